//! Reverse geocoding: coordinates to the town name shown on tiles.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use std::time::Duration;

use async_trait::async_trait;
use feels_core::GeocodingConfig;
use reqwest::Client;
use serde::Deserialize;

/// Resolves the town at a position. `None` means "unknown", never an error.
#[async_trait]
pub trait TownResolver: Send + Sync {
    async fn town_at(&self, latitude: f64, longitude: f64) -> Option<String>;
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
}

impl NominatimAddress {
    fn into_town(self) -> Option<String> {
        self.city
            .or(self.town)
            .or(self.village)
            .or(self.municipality)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct NominatimResolver {
    client: Option<Client>,
    base_url: String,
}

impl NominatimResolver {
    pub fn new(base_url: impl Into<String>, user_agent: &str, timeout: Duration) -> Self {
        let client = match Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
        {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!("Failed to create geocoding client: {}", e);
                None
            }
        };

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &GeocodingConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl TownResolver for NominatimResolver {
    async fn town_at(&self, latitude: f64, longitude: f64) -> Option<String> {
        let client = self.client.as_ref()?;

        let url = format!(
            "{}?lat={}&lon={}&format=json&addressdetails=1&zoom=10",
            self.base_url, latitude, longitude
        );

        let response = match client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Reverse geocode request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Reverse geocode returned status {}", response.status());
            return None;
        }

        let body: NominatimResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Reverse geocode parse error: {}", e);
                return None;
            }
        };

        let town = body.address?.into_town()?;
        tracing::info!("Reverse geocoded to: {}", town);
        Some(town)
    }
}
