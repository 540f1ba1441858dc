use feels_core::{AppError, SettingsError};
use feels_tiles::TileError;
use feels_weather::WeatherError;
use thiserror::Error;

/// Background task errors
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task cancelled: {0}")]
    Cancelled(String),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Forecast error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Tile error: {0}")]
    Tile(#[from] TileError),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Cancelled(_) => AppError::Cancelled,
            TaskError::Settings(e) => AppError::Settings(e),
            TaskError::Weather(WeatherError::Network(e)) => AppError::Network(e),
            TaskError::Weather(e) => AppError::Service(e.to_string()),
            TaskError::Tile(e) => e.into(),
        }
    }
}
