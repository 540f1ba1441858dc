//! Weather data for Feels
//!
//! Forecast model in the Dark Sky shape, a forecast provider, reverse
//! geocoding to a town name, and the device position seam.

pub mod geocode;
pub mod location;
pub mod provider;
pub mod retry;
pub mod types;

pub use geocode::{NominatimResolver, TownResolver};
pub use location::{FixedGeolocator, Geolocator, Position};
pub use provider::{DarkSkyProvider, ForecastRequest, ForecastSource};
pub use retry::RetryConfig;
pub use types::*;
