//! Persisted key-value settings.
//!
//! User preferences (unit system, language, favorite location) and the
//! background task activity log live here. Values are plain strings; typed
//! access is layered on top by the crates that own the value types.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use crate::error::SettingsError;

/// Well-known setting keys.
pub mod keys {
    pub const UNIT: &str = "Unit";
    pub const LANGUAGE: &str = "Language";
    pub const PRIMARY_TILE_TASK_TYPE: &str = "PrimaryTileTaskType";
    pub const FAVORITE_LOCATION: &str = "FavoriteLocation";
    pub const SAVED_LOCATIONS: &str = "SavedLocations";
    pub const TILE_TASK_ACTIVITY: &str = "TileUpdaterTaskActivity";
}

/// Key-value settings storage.
///
/// Implementations must be safe to share between a foreground caller and a
/// background task.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    fn remove(&self, key: &str) -> Result<(), SettingsError>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Volatile settings, used by tests and one-shot CLI runs.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with initial values.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.values.write().remove(key);
        Ok(())
    }
}

/// Settings persisted as a flat JSON object, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileSettings {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileSettings {
    /// Open the store at `path`. A missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents).map_err(|e| {
                SettingsError::Storage(format!("corrupt settings file {}: {}", path.display(), e))
            })?
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened settings store at {}", path.display());
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(values)
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut values = self.values.lock();
        let mut updated = values.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated)?;
        *values = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let mut values = self.values.lock();
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut updated = values.clone();
        updated.remove(key);
        self.persist(&updated)?;
        *values = updated;
        Ok(())
    }
}
