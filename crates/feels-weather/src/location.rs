//! Device position lookup.

use async_trait::async_trait;

use crate::types::LocationError;

/// A geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Source of the device position
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// Always reports the same position, or unavailable when none is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGeolocator {
    position: Option<Position>,
}

impl FixedGeolocator {
    pub fn new(position: Option<(f64, f64)>) -> Self {
        Self {
            position: position.map(|(latitude, longitude)| Position {
                latitude,
                longitude,
            }),
        }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Position, LocationError> {
        self.position.ok_or(LocationError::ServiceUnavailable)
    }
}
