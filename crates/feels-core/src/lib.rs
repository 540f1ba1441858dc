pub mod app;
pub mod config;
pub mod error;
pub mod settings;

pub use app::App;
pub use config::{
    Config, GeocodingConfig, LocationConfig, TileConfig, ValidationResult, WeatherConfig,
};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, SettingsError};
pub use settings::{keys, JsonFileSettings, MemorySettings, SettingsStore};

use anyhow::Result;

/// Initialize logging for the process
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!("Feels core initialized");
    Ok(())
}
