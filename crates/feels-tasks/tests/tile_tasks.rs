//! Primary and secondary tile tasks against in-memory collaborators.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use feels_core::{keys, MemorySettings, SettingsStore};
use feels_tasks::{
    Preferences, PrimaryTileTask, SecondaryTileTask, TaskError, TaskOutcome, TaskType,
};
use feels_tiles::{
    SecondaryTileRequest, SecondaryTiles, TileContent, TileDesigner, TileError, TileId,
    TileRegistry, TileSink, TileTarget,
};
use feels_weather::{
    FixedGeolocator, Forecast, ForecastRequest, ForecastSource, Language, LocationItem,
    MeasurementSystem, TownResolver, WeatherError,
};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

fn forecast(hours: i64) -> Forecast {
    let hourly: Vec<_> = (0..hours)
        .map(|i| {
            serde_json::json!({
                "time": 1_700_000_000 + i * 3600,
                "icon": "rain",
                "apparentTemperature": 10.0
            })
        })
        .collect();
    let daily: Vec<_> = (0..8)
        .map(|i| {
            serde_json::json!({
                "time": 1_700_000_000 + i * 86_400,
                "icon": "rain",
                "temperatureMax": 15.0,
                "temperatureMin": 5.0,
                "apparentTemperatureMax": 14.0,
                "apparentTemperatureMin": 4.0,
                "moonPhase": 0.1
            })
        })
        .collect();
    serde_json::from_value(serde_json::json!({
        "latitude": 0.0,
        "longitude": 0.0,
        "currently": {
            "time": 1_700_000_000,
            "summary": "Rain",
            "icon": "rain",
            "temperature": 12.0,
            "apparentTemperature": 11.0
        },
        "hourly": { "data": hourly },
        "daily": { "data": daily }
    }))
    .unwrap()
}

#[derive(Default)]
struct FakeForecasts {
    fail: bool,
    hang: bool,
    short: bool,
    requests: Mutex<Vec<ForecastRequest>>,
}

#[async_trait]
impl ForecastSource for FakeForecasts {
    async fn fetch(&self, request: ForecastRequest) -> Result<Forecast, WeatherError> {
        self.requests.lock().push(request);
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.fail {
            return Err(WeatherError::MissingApiKey);
        }
        Ok(forecast(if self.short { 3 } else { 12 }))
    }
}

struct FakeTowns(Option<&'static str>);

#[async_trait]
impl TownResolver for FakeTowns {
    async fn town_at(&self, _latitude: f64, _longitude: f64) -> Option<String> {
        self.0.map(String::from)
    }
}

#[derive(Default)]
struct RecordingSink {
    updates: Mutex<Vec<(TileTarget, TileContent)>>,
}

impl TileSink for RecordingSink {
    fn clear(&self, _target: &TileTarget) -> Result<(), TileError> {
        Ok(())
    }

    fn enable_notification_queue(
        &self,
        _target: &TileTarget,
        _enabled: bool,
    ) -> Result<(), TileError> {
        Ok(())
    }

    fn update(&self, target: &TileTarget, content: &TileContent) -> Result<(), TileError> {
        self.updates.lock().push((target.clone(), content.clone()));
        Ok(())
    }
}

#[derive(Default)]
struct FakeRegistry {
    pinned: Mutex<BTreeSet<TileId>>,
}

#[async_trait]
impl TileRegistry for FakeRegistry {
    async fn request_create(&self, request: SecondaryTileRequest) -> Result<bool, TileError> {
        Ok(self.pinned.lock().insert(request.id))
    }

    async fn request_delete(&self, id: &TileId) -> Result<bool, TileError> {
        Ok(self.pinned.lock().remove(id))
    }

    async fn exists(&self, id: &TileId) -> Result<bool, TileError> {
        Ok(self.pinned.lock().contains(id))
    }
}

struct Harness {
    store: Arc<MemorySettings>,
    forecasts: Arc<FakeForecasts>,
    sink: Arc<RecordingSink>,
}

impl Harness {
    fn new(values: Vec<(&str, &str)>, forecasts: FakeForecasts) -> Self {
        Self {
            store: Arc::new(MemorySettings::with_values(values)),
            forecasts: Arc::new(forecasts),
            sink: Arc::new(RecordingSink::default()),
        }
    }

    fn prefs(&self) -> Preferences {
        Preferences::new(self.store.clone())
    }

    fn primary(&self, position: Option<(f64, f64)>, town: Option<&'static str>) -> PrimaryTileTask {
        PrimaryTileTask::new(
            self.prefs(),
            self.forecasts.clone(),
            Arc::new(FakeTowns(town)),
            Arc::new(FixedGeolocator::new(position)),
            TileDesigner::new(self.sink.clone()),
        )
    }

    fn secondary(&self, registry: Arc<FakeRegistry>) -> SecondaryTileTask {
        SecondaryTileTask::new(
            self.prefs(),
            self.forecasts.clone(),
            SecondaryTiles::new(registry),
            TileDesigner::new(self.sink.clone()),
        )
    }

    fn current_status(&self) -> Option<String> {
        self.sink
            .updates
            .lock()
            .iter()
            .find_map(|(_, c)| c.lock_detailed_status.clone())
    }
}

#[tokio::test]
async fn gps_task_updates_primary_tile() {
    let h = Harness::new(
        vec![("Unit", "ca"), ("Language", "ru-RU")],
        FakeForecasts::default(),
    );
    let outcome = h
        .primary(Some((48.85, 2.35)), Some("Paris"))
        .run(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, TaskOutcome::Updated);
    assert_eq!(h.sink.updates.lock().len(), 4);
    assert!(h.current_status().unwrap().starts_with("Paris 11°"));

    let requests = h.forecasts.requests.lock();
    assert_eq!(requests[0].latitude, 48.85);
    assert_eq!(requests[0].units, MeasurementSystem::Ca);
    assert_eq!(requests[0].language, Language::Russian);

    let activity = h.prefs().task_activity().unwrap().unwrap();
    assert!(activity.exception.is_none());
}

#[tokio::test]
async fn gps_without_position_ends_quietly() {
    let h = Harness::new(vec![], FakeForecasts::default());
    let outcome = h.primary(None, None).run(&CancellationToken::new()).await.unwrap();

    assert_eq!(outcome, TaskOutcome::NoLocation);
    assert!(h.forecasts.requests.lock().is_empty());
    assert!(h.sink.updates.lock().is_empty());
    assert!(!h.store.contains(keys::TILE_TASK_ACTIVITY));
}

#[tokio::test]
async fn unresolved_town_is_empty() {
    let h = Harness::new(vec![], FakeForecasts::default());
    h.primary(Some((1.0, 2.0)), None)
        .run(&CancellationToken::new())
        .await
        .unwrap();
    assert!(h.current_status().unwrap().starts_with(" 11°"));
}

#[tokio::test]
async fn location_task_without_favorite_updates_nothing() {
    let h = Harness::new(vec![("PrimaryTileTaskType", "location")], FakeForecasts::default());
    let outcome = h
        .primary(Some((1.0, 2.0)), Some("Nowhere"))
        .run(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, TaskOutcome::NoLocation);
    assert!(h.sink.updates.lock().is_empty());
}

#[tokio::test]
async fn location_task_uses_favorite_town() {
    let h = Harness::new(vec![], FakeForecasts::default());
    h.prefs().set_task_type(TaskType::Location).unwrap();
    let mut lyon = LocationItem::new("Lyon, France", 45.76, 4.83);
    lyon.town = Some("Lyon".into());
    h.prefs().set_favorite_location(&lyon).unwrap();

    h.primary(None, Some("ignored"))
        .run(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(h.forecasts.requests.lock()[0].latitude, 45.76);
    assert!(h.current_status().unwrap().starts_with("Lyon 11°"));
}

#[tokio::test]
async fn failed_fetch_still_records_activity() {
    let h = Harness::new(
        vec![],
        FakeForecasts {
            fail: true,
            ..FakeForecasts::default()
        },
    );
    let outcome = h
        .primary(Some((1.0, 2.0)), Some("Paris"))
        .run(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, TaskOutcome::NoForecast);
    assert!(h.sink.updates.lock().is_empty());
    assert!(h.prefs().task_activity().unwrap().is_some());
}

#[tokio::test]
async fn failed_update_records_exception() {
    let h = Harness::new(
        vec![],
        FakeForecasts {
            short: true,
            ..FakeForecasts::default()
        },
    );
    let err = h
        .primary(Some((1.0, 2.0)), Some("Paris"))
        .run(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::Tile(_)));
    assert!(h.sink.updates.lock().is_empty());
    let activity = h.prefs().task_activity().unwrap().unwrap();
    assert!(activity.exception.unwrap().contains("hourly"));
}

#[tokio::test]
async fn cancelled_task_records_exception() {
    let h = Harness::new(
        vec![],
        FakeForecasts {
            hang: true,
            ..FakeForecasts::default()
        },
    );
    let cancel = CancellationToken::new();
    let task = h.primary(Some((1.0, 2.0)), Some("Paris"));

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = task.run(&cancel).await.unwrap_err();
    assert!(matches!(err, TaskError::Cancelled(_)));
    assert!(h.sink.updates.lock().is_empty());

    let activity = h.prefs().task_activity().unwrap().unwrap();
    assert!(activity.exception.is_some());
}

#[tokio::test]
async fn secondary_task_routes_by_encoded_name() {
    let h = Harness::new(vec![], FakeForecasts::default());
    let st_louis = LocationItem::new("St. Louis, USA", 38.63, -90.2);
    h.prefs()
        .set_saved_locations(&[LocationItem::new("Paris, France", 48.85, 2.35), st_louis])
        .unwrap();

    let task = h.secondary(Arc::new(FakeRegistry::default()));
    let id = TileId::from_raw("St.Louis.USA");
    let outcome = task.run(&id, &CancellationToken::new()).await.unwrap();

    assert_eq!(outcome, TaskOutcome::Updated);
    assert_eq!(h.forecasts.requests.lock()[0].latitude, 38.63);
    let updates = h.sink.updates.lock();
    assert!(updates
        .iter()
        .all(|(target, _)| *target == TileTarget::Secondary(id.clone())));
    assert!(h_status(&updates).starts_with("St. Louis, USA "));
}

fn h_status(updates: &[(TileTarget, TileContent)]) -> String {
    updates
        .iter()
        .find_map(|(_, c)| c.lock_detailed_status.clone())
        .unwrap_or_default()
}

#[tokio::test]
async fn secondary_task_unknown_id_is_skipped() {
    let h = Harness::new(vec![], FakeForecasts::default());
    let task = h.secondary(Arc::new(FakeRegistry::default()));
    let outcome = task
        .run(&TileId::from_raw("Atlantis"), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, TaskOutcome::NoLocation);
    assert!(h.forecasts.requests.lock().is_empty());
}

#[tokio::test]
async fn refresh_pinned_only_touches_pinned_tiles() {
    let h = Harness::new(vec![], FakeForecasts::default());
    let paris = LocationItem::new("Paris, France", 48.85, 2.35);
    let lyon = LocationItem::new("Lyon, France", 45.76, 4.83);
    h.prefs()
        .set_saved_locations(&[paris.clone(), lyon])
        .unwrap();

    let registry = Arc::new(FakeRegistry::default());
    SecondaryTiles::new(registry.clone()).pin(&paris).await.unwrap();

    let updated = h
        .secondary(registry)
        .refresh_pinned(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(updated, 1);
    assert_eq!(h.forecasts.requests.lock().len(), 1);
}
