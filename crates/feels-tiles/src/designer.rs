//! Pushes composed content to the primary and secondary tiles.

use std::fmt;
use std::sync::Arc;

use feels_core::AppError;
use feels_weather::{Forecast, LocationItem};

use crate::compose::{compose_all, ComposeError, DisplayContext};
use crate::document::TileContent;
use crate::identity::TileId;

/// Errors from tile updates, pinning and sinks
#[derive(Debug, thiserror::Error)]
pub enum TileError {
    #[error("Composition failed: {0}")]
    Compose(#[from] ComposeError),

    #[error("Tile sink error: {0}")]
    Sink(String),

    #[error("Tile registry error: {0}")]
    Registry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TileError {
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink(message.into())
    }

    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry(message.into())
    }
}

impl From<TileError> for AppError {
    fn from(err: TileError) -> Self {
        match err {
            TileError::Io(e) => AppError::Io(e),
            other => AppError::Service(other.to_string()),
        }
    }
}

/// The tile an update is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TileTarget {
    Primary,
    Secondary(TileId),
}

impl fmt::Display for TileTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileTarget::Primary => f.write_str("primary"),
            TileTarget::Secondary(id) => write!(f, "secondary/{id}"),
        }
    }
}

/// Receiver of tile content, standing in for the platform tile updater.
///
/// Implementations serialize concurrent calls for the same target themselves.
pub trait TileSink: Send + Sync {
    /// Drop everything queued on the tile
    fn clear(&self, target: &TileTarget) -> Result<(), TileError>;

    /// Let the tile cycle through queued notifications
    fn enable_notification_queue(&self, target: &TileTarget, enabled: bool)
        -> Result<(), TileError>;

    /// Queue one category's content
    fn update(&self, target: &TileTarget, content: &TileContent) -> Result<(), TileError>;
}

/// Fans a forecast out to the four tile categories.
///
/// Holds its sink explicitly; there is no process-wide updater.
#[derive(Clone)]
pub struct TileDesigner {
    sink: Arc<dyn TileSink>,
    notification_queue: bool,
}

impl TileDesigner {
    pub fn new(sink: Arc<dyn TileSink>) -> Self {
        Self {
            sink,
            notification_queue: true,
        }
    }

    /// Whether updates enable the notification queue before pushing content
    pub fn with_notification_queue(mut self, enabled: bool) -> Self {
        self.notification_queue = enabled;
        self
    }

    /// Updates the app tile. Returns `false` without touching the tile when
    /// there is no forecast.
    pub fn update_primary(
        &self,
        forecast: Option<&Forecast>,
        ctx: &DisplayContext,
    ) -> Result<bool, TileError> {
        let Some(forecast) = forecast else {
            tracing::debug!("No forecast available, primary tile left as is");
            return Ok(false);
        };
        self.push(&TileTarget::Primary, forecast, ctx)?;
        Ok(true)
    }

    /// Updates a pinned location tile, showing the location name as the town
    pub fn update_secondary(
        &self,
        id: &TileId,
        forecast: Option<&Forecast>,
        location: &LocationItem,
        ctx: &DisplayContext,
    ) -> Result<bool, TileError> {
        let Some(forecast) = forecast else {
            tracing::debug!("No forecast available, tile {} left as is", id);
            return Ok(false);
        };
        let ctx = ctx.clone().town(location.name.clone());
        self.push(&TileTarget::Secondary(id.clone()), forecast, &ctx)?;
        Ok(true)
    }

    fn push(
        &self,
        target: &TileTarget,
        forecast: &Forecast,
        ctx: &DisplayContext,
    ) -> Result<(), TileError> {
        // Compose everything up front so a short forecast never leaves the tile cleared
        let contents = compose_all(forecast, ctx)?;

        self.sink.clear(target)?;
        if self.notification_queue {
            self.sink.enable_notification_queue(target, true)?;
        }
        for content in &contents {
            self.sink.update(target, content)?;
        }

        tracing::info!("Updated {} tile ({} categories)", target, contents.len());
        Ok(())
    }
}
