use anyhow::{Context, Result};
use std::sync::Arc;

use crate::settings::{JsonFileSettings, SettingsStore};
use crate::Config;

/// Application state and lifecycle manager.
///
/// Owns the handles shared by foreground actions and background tasks. They are
/// acquired once in [`App::new`] and released in [`App::shutdown`]; nothing is
/// kept in process-wide statics.
pub struct App {
    config: Arc<Config>,
    settings: Arc<dyn SettingsStore>,
    running: bool,
}

impl App {
    /// Create an application from the on-disk config and settings
    pub fn new() -> Result<Self> {
        let (config, _) = Config::load_validated()?;
        let settings = JsonFileSettings::open(config.settings_path())
            .context("Failed to open settings store")?;
        Ok(Self::with_parts(config, Arc::new(settings)))
    }

    /// Create an application from explicit parts
    pub fn with_parts(config: Config, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            config: Arc::new(config),
            settings,
            running: false,
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        tracing::info!(
            "Initializing application (config dir {})",
            self.config.config_dir.display()
        );
        self.running = true;
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        tracing::info!("Shutting down application");
        self.running = false;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shared_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn settings(&self) -> Arc<dyn SettingsStore> {
        self.settings.clone()
    }
}
