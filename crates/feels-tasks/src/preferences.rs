//! Typed access to the settings the tile tasks read and write.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use feels_core::{keys, SettingsError, SettingsStore};
use feels_weather::{Language, LocationItem, MeasurementSystem};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const GPS_TASK_TYPE: &str = "gps";
pub const LOCATION_TASK_TYPE: &str = "location";

/// How the primary tile task finds its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    Gps,
    Location,
}

impl TaskType {
    /// Absent or "gps" is GPS; any other value means the favorite location
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            None | Some(GPS_TASK_TYPE) => Self::Gps,
            Some(_) => Self::Location,
        }
    }

    pub fn as_setting(&self) -> &'static str {
        match self {
            Self::Gps => GPS_TASK_TYPE,
            Self::Location => LOCATION_TASK_TYPE,
        }
    }
}

/// Last run of the tile updater task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskActivity {
    pub last_run: DateTime<FixedOffset>,
    pub exception: Option<String>,
}

impl TaskActivity {
    pub fn succeeded() -> Self {
        Self {
            last_run: Local::now().fixed_offset(),
            exception: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            last_run: Local::now().fixed_offset(),
            exception: Some(reason.into()),
        }
    }
}

#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn SettingsStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn SettingsStore> {
        &self.store
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        let Some(raw) = self.store.get(key) else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SettingsError::invalid_value(key, e.to_string()))
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| SettingsError::invalid_value(key, e.to_string()))?;
        self.store.set(key, &raw)
    }

    /// Unit system, US when unset or unrecognized
    pub fn unit(&self) -> MeasurementSystem {
        self.store
            .get(keys::UNIT)
            .map(|v| MeasurementSystem::from_setting(&v))
            .unwrap_or_default()
    }

    pub fn set_unit(&self, units: MeasurementSystem) -> Result<(), SettingsError> {
        self.store.set(keys::UNIT, units.as_query())
    }

    /// Display language from the stored language tag
    pub fn language(&self) -> Language {
        self.store
            .get(keys::LANGUAGE)
            .map(|tag| Language::from_tag(&tag))
            .unwrap_or_default()
    }

    pub fn set_language(&self, tag: &str) -> Result<(), SettingsError> {
        self.store.set(keys::LANGUAGE, tag)
    }

    pub fn task_type(&self) -> TaskType {
        TaskType::from_setting(self.store.get(keys::PRIMARY_TILE_TASK_TYPE).as_deref())
    }

    pub fn set_task_type(&self, task_type: TaskType) -> Result<(), SettingsError> {
        self.store
            .set(keys::PRIMARY_TILE_TASK_TYPE, task_type.as_setting())
    }

    pub fn favorite_location(&self) -> Result<Option<LocationItem>, SettingsError> {
        self.get_json(keys::FAVORITE_LOCATION)
    }

    pub fn set_favorite_location(&self, location: &LocationItem) -> Result<(), SettingsError> {
        self.set_json(keys::FAVORITE_LOCATION, location)
    }

    pub fn saved_locations(&self) -> Result<Vec<LocationItem>, SettingsError> {
        Ok(self.get_json(keys::SAVED_LOCATIONS)?.unwrap_or_default())
    }

    pub fn set_saved_locations(&self, locations: &[LocationItem]) -> Result<(), SettingsError> {
        self.set_json(keys::SAVED_LOCATIONS, &locations)
    }

    pub fn task_activity(&self) -> Result<Option<TaskActivity>, SettingsError> {
        self.get_json(keys::TILE_TASK_ACTIVITY)
    }

    pub fn record_activity(&self, activity: &TaskActivity) -> Result<(), SettingsError> {
        self.set_json(keys::TILE_TASK_ACTIVITY, activity)
    }
}
