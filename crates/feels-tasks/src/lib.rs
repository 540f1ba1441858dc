//! Background tile tasks for Feels
//!
//! One-shot refreshes of the primary tile and of pinned location tiles,
//! driven by the persisted preferences.

pub mod error;
pub mod preferences;
pub mod primary;
pub mod secondary;

pub use error::{TaskError, TaskResult};
pub use preferences::{Preferences, TaskActivity, TaskType};
pub use primary::{PrimaryTileTask, TaskOutcome};
pub use secondary::SecondaryTileTask;
