//! Forecast fetching from a Dark Sky compatible API.

use std::time::Duration;

use async_trait::async_trait;
use feels_core::WeatherConfig;
use reqwest::Client;
use url::Url;

use crate::retry::{with_retry, RetryConfig};
use crate::types::{Forecast, Language, MeasurementSystem, WeatherError};

const EXCLUDED_BLOCKS: &str = "minutely,alerts,flags";

/// Parameters of a single forecast request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub units: MeasurementSystem,
    pub language: Language,
}

impl ForecastRequest {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            units: MeasurementSystem::default(),
            language: Language::default(),
        }
    }

    pub fn units(mut self, units: MeasurementSystem) -> Self {
        self.units = units;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// Anything that can produce a forecast for a position
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self, request: ForecastRequest) -> Result<Forecast, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct DarkSkyProvider {
    client: Client,
    base_url: String,
    api_key: String,
    retry: RetryConfig,
}

impl DarkSkyProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            retry: RetryConfig::default(),
        })
    }

    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Full request URL, API key included
    pub fn forecast_url(&self, request: &ForecastRequest) -> Result<Url, WeatherError> {
        let raw = format!(
            "{}/forecast/{}/{},{}",
            self.base_url.trim_end_matches('/'),
            self.api_key,
            request.latitude,
            request.longitude
        );
        let mut url = Url::parse(&raw).map_err(|e| WeatherError::InvalidRequest(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("units", request.units.as_query())
            .append_pair("lang", request.language.code())
            .append_pair("exclude", EXCLUDED_BLOCKS);
        Ok(url)
    }
}

#[async_trait]
impl ForecastSource for DarkSkyProvider {
    async fn fetch(&self, request: ForecastRequest) -> Result<Forecast, WeatherError> {
        if self.api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let url = self.forecast_url(&request)?;
        tracing::debug!(
            latitude = request.latitude,
            longitude = request.longitude,
            units = request.units.as_query(),
            "Fetching forecast"
        );

        let response = with_retry(&self.retry, || self.client.get(url.clone()).send()).await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("Forecast request failed with status {}", status);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let forecast: Forecast = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        tracing::info!(
            hours = forecast.hourly.len(),
            days = forecast.daily.len(),
            "Forecast fetched"
        );
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> DarkSkyProvider {
        DarkSkyProvider::new("https://api.example.com/", "secret", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_forecast_url_layout() {
        let request = ForecastRequest::new(48.85, 2.35)
            .units(MeasurementSystem::Ca)
            .language(Language::French);
        let url = provider().forecast_url(&request).unwrap();

        assert_eq!(url.path(), "/forecast/secret/48.85,2.35");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("units".into(), "ca".into())));
        assert!(pairs.contains(&("lang".into(), "fr".into())));
        assert!(pairs.contains(&("exclude".into(), EXCLUDED_BLOCKS.into())));
    }

    #[test]
    fn test_negative_coordinates() {
        let url = provider()
            .forecast_url(&ForecastRequest::new(-33.87, -151.2))
            .unwrap();
        assert_eq!(url.path(), "/forecast/secret/-33.87,-151.2");
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let provider =
            DarkSkyProvider::new("https://api.example.com", " ", Duration::from_secs(5)).unwrap();
        let err = provider
            .fetch(ForecastRequest::new(0.0, 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }
}
