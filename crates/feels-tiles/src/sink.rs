//! JSON directory tile sink.
//!
//! Layout: `<root>/<target>/<category>.json`, one file per queued category,
//! with the primary tile under `primary/` and secondary tiles under
//! `secondary/<tile id>/`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;

use crate::designer::{TileError, TileSink, TileTarget};
use crate::document::TileContent;

const QUEUE_MARKER: &str = "queue.json";

#[derive(Serialize)]
struct QueueState {
    enabled: bool,
}

pub struct JsonDirectorySink {
    root: PathBuf,
    // Serializes writes so a clear never interleaves with an update
    lock: Mutex<()>,
}

impl JsonDirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one tile's content.
    ///
    /// Secondary ids must name a single directory under `secondary/`.
    pub fn target_dir(&self, target: &TileTarget) -> Result<PathBuf, TileError> {
        match target {
            TileTarget::Primary => Ok(self.root.join("primary")),
            TileTarget::Secondary(id) => {
                let name = id.as_str();
                let mut components = Path::new(name).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(part)), None) if !name.contains(['/', '\\']) => {
                        Ok(self.root.join("secondary").join(part))
                    }
                    _ => Err(TileError::sink(format!(
                        "tile id '{name}' is not a valid directory name"
                    ))),
                }
            }
        }
    }
}

impl TileSink for JsonDirectorySink {
    fn clear(&self, target: &TileTarget) -> Result<(), TileError> {
        let _guard = self.lock.lock();
        let dir = self.target_dir(target)?;
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        tracing::debug!("Cleared tile content at {}", dir.display());
        Ok(())
    }

    fn enable_notification_queue(
        &self,
        target: &TileTarget,
        enabled: bool,
    ) -> Result<(), TileError> {
        let _guard = self.lock.lock();
        let dir = self.target_dir(target)?;
        fs::create_dir_all(&dir)?;
        let json = serde_json::to_string_pretty(&QueueState { enabled })?;
        fs::write(dir.join(QUEUE_MARKER), json)?;
        Ok(())
    }

    fn update(&self, target: &TileTarget, content: &TileContent) -> Result<(), TileError> {
        let _guard = self.lock.lock();
        let dir = self.target_dir(target)?;
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.json", content.category.name()));
        let json = serde_json::to_string_pretty(content)?;
        fs::write(&path, json)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}
