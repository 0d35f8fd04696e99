//! Station entity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when station fields fail validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station: {reason}")]
pub struct InvalidStation {
    reason: &'static str,
}

/// Identifier of a persisted station.
///
/// Identifiers are opaque and allocated by the store; callers never
/// invent them.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct StationId(u64);

impl StationId {
    /// Wrap a raw identifier value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated station draft, ready to be persisted.
///
/// This is the construction-time home of the defaulting rules: an unset
/// track count becomes 1, an unset open status becomes open. Name and
/// city are trimmed and must be non-empty.
///
/// # Examples
///
/// ```
/// use rail_server::domain::StationDraft;
///
/// let draft = StationDraft::new("Gare de Lyon", "Paris", None, None).unwrap();
/// assert_eq!(draft.tracks, 1);
/// assert!(draft.is_open);
///
/// // Blank names are rejected
/// assert!(StationDraft::new("  ", "Paris", None, None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationDraft {
    /// Station name.
    pub name: String,

    /// City the station serves.
    pub city: String,

    /// Number of tracks.
    pub tracks: u32,

    /// Whether the station is open for traffic.
    pub is_open: bool,
}

impl StationDraft {
    /// Validate station fields and apply creation defaults.
    pub fn new(
        name: &str,
        city: &str,
        tracks: Option<u32>,
        is_open: Option<bool>,
    ) -> Result<Self, InvalidStation> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InvalidStation {
                reason: "name must not be empty",
            });
        }

        let city = city.trim();
        if city.is_empty() {
            return Err(InvalidStation {
                reason: "city must not be empty",
            });
        }

        Ok(Self {
            name: name.to_string(),
            city: city.to_string(),
            tracks: tracks.unwrap_or(1),
            is_open: is_open.unwrap_or(true),
        })
    }
}

/// A persisted station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Store-allocated identifier.
    pub id: StationId,

    /// Station name.
    pub name: String,

    /// City the station serves.
    pub city: String,

    /// Number of tracks.
    pub tracks: u32,

    /// Whether the station is open for traffic.
    pub is_open: bool,
}

impl Station {
    /// Attach a store-allocated identifier to a draft.
    pub fn from_draft(id: StationId, draft: StationDraft) -> Self {
        Self {
            id,
            name: draft.name,
            city: draft.city,
            tracks: draft.tracks,
            is_open: draft.is_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied_when_unset() {
        let draft = StationDraft::new("Part-Dieu", "Lyon", None, None).unwrap();
        assert_eq!(draft.tracks, 1);
        assert!(draft.is_open);
    }

    #[test]
    fn explicit_values_kept() {
        let draft = StationDraft::new("Saint-Charles", "Marseille", Some(16), Some(false)).unwrap();
        assert_eq!(draft.tracks, 16);
        assert!(!draft.is_open);
    }

    #[test]
    fn zero_tracks_allowed() {
        let draft = StationDraft::new("Halt", "Nowhere", Some(0), None).unwrap();
        assert_eq!(draft.tracks, 0);
    }

    #[test]
    fn name_and_city_trimmed() {
        let draft = StationDraft::new("  Montparnasse ", " Paris  ", None, None).unwrap();
        assert_eq!(draft.name, "Montparnasse");
        assert_eq!(draft.city, "Paris");
    }

    #[test]
    fn blank_name_rejected() {
        assert!(StationDraft::new("", "Paris", None, None).is_err());
        assert!(StationDraft::new("   ", "Paris", None, None).is_err());
    }

    #[test]
    fn blank_city_rejected() {
        assert!(StationDraft::new("Gare du Nord", "", None, None).is_err());
        assert!(StationDraft::new("Gare du Nord", "  ", None, None).is_err());
    }

    #[test]
    fn id_display() {
        assert_eq!(StationId::new(42).to_string(), "42");
        assert_eq!(format!("{:?}", StationId::new(42)), "StationId(42)");
    }

    #[test]
    fn from_draft_carries_fields() {
        let draft = StationDraft::new("Perrache", "Lyon", Some(12), Some(true)).unwrap();
        let station = Station::from_draft(StationId::new(7), draft);
        assert_eq!(station.id, StationId::new(7));
        assert_eq!(station.name, "Perrache");
        assert_eq!(station.city, "Lyon");
        assert_eq!(station.tracks, 12);
        assert!(station.is_open);
    }
}
