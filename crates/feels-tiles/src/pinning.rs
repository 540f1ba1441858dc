//! Secondary tile lifecycle: pin, unpin and existence checks per location.

use std::sync::Arc;

use async_trait::async_trait;
use feels_weather::LocationItem;
use serde::{Deserialize, Serialize};

use crate::designer::TileError;
use crate::identity::TileId;

pub const SQUARE_150_LOGO: &str = "Assets/Square150x150Logo.scale-100.png";
pub const WIDE_310_LOGO: &str = "Assets/Wide310x150Logo.scale-100.png";
pub const SQUARE_310_LOGO: &str = "Assets/LargeTile.scale-100.png";

/// Everything the platform needs to create a location tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryTileRequest {
    pub id: TileId,
    pub display_name: String,
    /// Handed back to the app when the tile is activated
    pub arguments: String,
    pub square150_logo: String,
    pub wide310_logo: String,
    pub square310_logo: String,
    pub show_name_on_square150: bool,
}

impl SecondaryTileRequest {
    pub fn for_location(location: &LocationItem) -> Self {
        let id = TileId::for_name(&location.name);
        Self {
            arguments: id.as_str().to_string(),
            id,
            display_name: location.name.clone(),
            square150_logo: SQUARE_150_LOGO.to_string(),
            wide310_logo: WIDE_310_LOGO.to_string(),
            square310_logo: SQUARE_310_LOGO.to_string(),
            show_name_on_square150: false,
        }
    }
}

/// Platform registry of secondary tiles.
///
/// Create and delete may prompt the user; they resolve to whether the
/// change happened.
#[async_trait]
pub trait TileRegistry: Send + Sync {
    async fn request_create(&self, request: SecondaryTileRequest) -> Result<bool, TileError>;

    async fn request_delete(&self, id: &TileId) -> Result<bool, TileError>;

    async fn exists(&self, id: &TileId) -> Result<bool, TileError>;
}

/// Location-facing pin operations over a [`TileRegistry`]
#[derive(Clone)]
pub struct SecondaryTiles {
    registry: Arc<dyn TileRegistry>,
}

impl SecondaryTiles {
    pub fn new(registry: Arc<dyn TileRegistry>) -> Self {
        Self { registry }
    }

    /// Asks to pin a tile for the location. Returns whether the user accepted.
    pub async fn pin(&self, location: &LocationItem) -> Result<bool, TileError> {
        let request = SecondaryTileRequest::for_location(location);
        let id = request.id.clone();
        let pinned = self.registry.request_create(request).await?;
        if pinned {
            tracing::info!("Pinned secondary tile {}", id);
        } else {
            tracing::info!("Pin of {} declined", id);
        }
        Ok(pinned)
    }

    pub async fn unpin(&self, location: &LocationItem) -> Result<bool, TileError> {
        self.unpin_id(&TileId::for_name(&location.name)).await
    }

    /// Removes the tile when it exists. Returns whether a tile was removed.
    pub async fn unpin_id(&self, id: &TileId) -> Result<bool, TileError> {
        if !self.registry.exists(id).await? {
            tracing::debug!("No secondary tile {} to unpin", id);
            return Ok(false);
        }
        let removed = self.registry.request_delete(id).await?;
        if removed {
            tracing::info!("Unpinned secondary tile {}", id);
        }
        Ok(removed)
    }

    pub async fn is_pinned(&self, location: &LocationItem) -> Result<bool, TileError> {
        self.exists(&location.name).await
    }

    pub async fn exists(&self, name: &str) -> Result<bool, TileError> {
        self.registry.exists(&TileId::for_name(name)).await
    }
}
