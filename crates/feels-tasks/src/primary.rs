//! Background refresh of the primary tile.

use std::future::Future;
use std::sync::Arc;

use feels_tiles::{DisplayContext, TileDesigner};
use feels_weather::{ForecastRequest, ForecastSource, Geolocator, TownResolver};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{TaskError, TaskResult};
use crate::preferences::{Preferences, TaskActivity, TaskType};

/// How a task run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The tile shows fresh content
    Updated,
    /// No position or location to forecast for; nothing was touched
    NoLocation,
    /// The forecast could not be fetched; the tile keeps its content
    NoForecast,
}

/// Awaits `fut` unless the token fires first
pub(crate) async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> TaskResult<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(TaskError::Cancelled("cancellation requested".into())),
        output = fut => Ok(output),
    }
}

pub struct PrimaryTileTask {
    prefs: Preferences,
    forecasts: Arc<dyn ForecastSource>,
    towns: Arc<dyn TownResolver>,
    geolocator: Arc<dyn Geolocator>,
    designer: TileDesigner,
}

impl PrimaryTileTask {
    pub fn new(
        prefs: Preferences,
        forecasts: Arc<dyn ForecastSource>,
        towns: Arc<dyn TownResolver>,
        geolocator: Arc<dyn Geolocator>,
        designer: TileDesigner,
    ) -> Self {
        Self {
            prefs,
            forecasts,
            towns,
            geolocator,
            designer,
        }
    }

    /// Runs once, recording the outcome under the task activity key.
    ///
    /// A cancelled or failed run records the error as the activity exception
    /// before returning it.
    pub async fn run(&self, cancel: &CancellationToken) -> TaskResult<TaskOutcome> {
        match self.refresh(cancel).await {
            Err(TaskError::Cancelled(reason)) => {
                warn!("Primary tile task cancelled: {}", reason);
                self.prefs.record_activity(&TaskActivity::failed(&reason))?;
                Err(TaskError::Cancelled(reason))
            }
            Ok(TaskOutcome::NoLocation) => Ok(TaskOutcome::NoLocation),
            Ok(outcome) => {
                self.prefs.record_activity(&TaskActivity::succeeded())?;
                info!("Primary tile task finished: {:?}", outcome);
                Ok(outcome)
            }
            Err(e) => {
                warn!("Primary tile task failed: {}", e);
                self.prefs.record_activity(&TaskActivity::failed(e.to_string()))?;
                Err(e)
            }
        }
    }

    async fn refresh(&self, cancel: &CancellationToken) -> TaskResult<TaskOutcome> {
        let (latitude, longitude, town) = match self.prefs.task_type() {
            TaskType::Gps => {
                let position =
                    match until_cancelled(cancel, self.geolocator.current_position()).await? {
                        Ok(p) => p,
                        Err(e) => {
                            info!("No position available ({}), skipping tile update", e);
                            return Ok(TaskOutcome::NoLocation);
                        }
                    };
                let town = until_cancelled(
                    cancel,
                    self.towns.town_at(position.latitude, position.longitude),
                )
                .await?
                .unwrap_or_default();
                (position.latitude, position.longitude, town)
            }
            TaskType::Location => {
                let Some(location) = self.prefs.favorite_location()? else {
                    info!("No favorite location saved, skipping tile update");
                    return Ok(TaskOutcome::NoLocation);
                };
                let town = location.display_town().to_string();
                (location.latitude, location.longitude, town)
            }
        };

        let request = ForecastRequest::new(latitude, longitude)
            .units(self.prefs.unit())
            .language(self.prefs.language());
        debug!("Fetching forecast for {},{}", latitude, longitude);

        let forecast = match until_cancelled(cancel, self.forecasts.fetch(request)).await? {
            Ok(f) => Some(f),
            Err(e) => {
                warn!("Forecast fetch failed: {}", e);
                None
            }
        };

        let ctx = DisplayContext::local_now()
            .town(town)
            .units(request.units)
            .language(request.language);

        if self.designer.update_primary(forecast.as_ref(), &ctx)? {
            Ok(TaskOutcome::Updated)
        } else {
            Ok(TaskOutcome::NoForecast)
        }
    }
}
