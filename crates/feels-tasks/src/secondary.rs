//! Background refresh of pinned location tiles.

use std::sync::Arc;

use feels_tiles::{DisplayContext, SecondaryTiles, TileDesigner, TileId};
use feels_weather::{ForecastRequest, ForecastSource, LocationItem};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::TaskResult;
use crate::preferences::Preferences;
use crate::primary::{until_cancelled, TaskOutcome};

pub struct SecondaryTileTask {
    prefs: Preferences,
    forecasts: Arc<dyn ForecastSource>,
    tiles: SecondaryTiles,
    designer: TileDesigner,
}

impl SecondaryTileTask {
    pub fn new(
        prefs: Preferences,
        forecasts: Arc<dyn ForecastSource>,
        tiles: SecondaryTiles,
        designer: TileDesigner,
    ) -> Self {
        Self {
            prefs,
            forecasts,
            tiles,
            designer,
        }
    }

    /// Saved location a tile id belongs to.
    ///
    /// Matches on encoded names since decoding an id does not always give
    /// back the original name.
    pub fn find_location(&self, id: &TileId) -> TaskResult<Option<LocationItem>> {
        Ok(self
            .prefs
            .saved_locations()?
            .into_iter()
            .find(|location| id.matches(&location.name)))
    }

    /// Refreshes the tile with the given id
    pub async fn run(&self, id: &TileId, cancel: &CancellationToken) -> TaskResult<TaskOutcome> {
        let Some(location) = self.find_location(id)? else {
            info!(
                "No saved location for tile {} ({}), skipping",
                id,
                id.display_name()
            );
            return Ok(TaskOutcome::NoLocation);
        };
        self.update(id, &location, cancel).await
    }

    /// Refreshes every saved location that has a pinned tile. Returns how
    /// many tiles were updated.
    pub async fn refresh_pinned(&self, cancel: &CancellationToken) -> TaskResult<usize> {
        let mut updated = 0;
        for location in self.prefs.saved_locations()? {
            if !until_cancelled(cancel, self.tiles.is_pinned(&location)).await?? {
                continue;
            }
            let id = TileId::for_name(&location.name);
            if self.update(&id, &location, cancel).await? == TaskOutcome::Updated {
                updated += 1;
            }
        }
        info!("Refreshed {} pinned location tiles", updated);
        Ok(updated)
    }

    async fn update(
        &self,
        id: &TileId,
        location: &LocationItem,
        cancel: &CancellationToken,
    ) -> TaskResult<TaskOutcome> {
        let request = ForecastRequest::new(location.latitude, location.longitude)
            .units(self.prefs.unit())
            .language(self.prefs.language());

        let forecast = match until_cancelled(cancel, self.forecasts.fetch(request)).await? {
            Ok(f) => Some(f),
            Err(e) => {
                warn!("Forecast fetch for {} failed: {}", location.name, e);
                None
            }
        };

        let ctx = DisplayContext::local_now()
            .units(request.units)
            .language(request.language);

        if self
            .designer
            .update_secondary(id, forecast.as_ref(), location, &ctx)?
        {
            Ok(TaskOutcome::Updated)
        } else {
            Ok(TaskOutcome::NoForecast)
        }
    }
}
