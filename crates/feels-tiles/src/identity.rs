//! Location name to tile id mapping.
//!
//! The transform is lossy: spaces are dropped on encode and every period
//! becomes ", " on decode, so "New York" encodes to "NewYork" and "St. Louis"
//! decodes to "St, Louis". Ids already persisted on devices use this scheme,
//! so compare encoded names instead of decoding when matching.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform-safe identifier of a secondary tile
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(String);

impl TileId {
    /// Id for a location name
    pub fn for_name(name: &str) -> Self {
        Self(encode(name))
    }

    /// Wraps an id received from the platform, e.g. task activation arguments
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort location name for display
    pub fn display_name(&self) -> String {
        decode(&self.0)
    }

    /// True when `name` maps to this id
    pub fn matches(&self, name: &str) -> bool {
        encode(name) == self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Removes spaces, then turns commas into periods
pub fn encode(name: &str) -> String {
    name.replace(' ', "").replace(',', ".")
}

/// Turns every period into ", "
pub fn decode(id: &str) -> String {
    id.replace('.', ", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_location_names() {
        assert_eq!(encode("Paris, France"), "Paris.France");
        assert_eq!(encode("New York"), "NewYork");
        assert_eq!(encode(""), "");
        assert_eq!(encode("a ,b, c"), "a.b.c");
    }

    #[test]
    fn decodes_ids() {
        assert_eq!(decode("Paris.France"), "Paris, France");
        assert_eq!(decode("NoPeriods"), "NoPeriods");
    }

    #[test]
    fn round_trip_holds_for_comma_space_names() {
        let name = "Lyon, Auvergne-Rhône-Alpes, France";
        assert_eq!(decode(&encode(name)), name);
    }

    #[test]
    fn transform_is_lossy() {
        assert_eq!(decode(&encode("New York")), "NewYork");
        assert_ne!(decode(&encode("New York, USA")), "New York, USA");
        assert_eq!(decode(&encode("St. Louis")), "St, Louis");
    }

    #[test]
    fn tile_id_matches_by_encoding() {
        let id = TileId::for_name("St. Louis, USA");
        assert!(id.matches("St. Louis, USA"));
        assert_ne!(id.display_name(), "St. Louis, USA");
        assert_eq!(TileId::from_raw("Paris.France"), TileId::for_name("Paris, France"));
        assert_eq!(id.to_string(), "St.Louis.USA");
    }
}
