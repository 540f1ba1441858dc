//! Tile content for Feels
//!
//! Composes size-specific tile layouts from a forecast, maps location names
//! to secondary tile ids, and hands the result to a tile sink.

pub mod compose;
pub mod designer;
pub mod document;
pub mod format;
pub mod icons;
pub mod identity;
pub mod pinning;
pub mod sink;
pub mod toast;

pub use compose::{compose, compose_all, compose_content, ComposeError, DisplayContext};
pub use designer::{TileDesigner, TileError, TileSink, TileTarget};
pub use document::{TileCategory, TileContent, TileSize, VisualDocument};
pub use identity::{decode, encode, TileId};
pub use pinning::{SecondaryTileRequest, SecondaryTiles, TileRegistry};
pub use sink::JsonDirectorySink;
pub use toast::{LogToastSink, ToastContent, ToastSink};
