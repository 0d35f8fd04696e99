//! Train entity types.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::StationId;

/// Error returned when train fields fail validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train: {reason}")]
pub struct InvalidTrain {
    reason: &'static str,
}

/// Identifier of a persisted train.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TrainId(u64);

impl TrainId {
    /// Wrap a raw identifier value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainId({})", self.0)
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated train draft, ready to be persisted.
///
/// The endpoint stations are held by identifier; the train references
/// them but does not own them. Whether those identifiers resolve is
/// checked at write time by the service layer, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainDraft {
    /// Commercial train number, unique across the fleet.
    pub number: String,

    /// Scheduled departure time.
    pub departure: Option<NaiveDateTime>,

    /// Scheduled arrival time.
    pub arrival: Option<NaiveDateTime>,

    /// Station the train departs from.
    pub departure_station: StationId,

    /// Station the train arrives at.
    pub arrival_station: StationId,
}

impl TrainDraft {
    /// Validate train fields.
    ///
    /// The number is trimmed and must be non-empty.
    pub fn new(
        number: &str,
        departure: Option<NaiveDateTime>,
        arrival: Option<NaiveDateTime>,
        departure_station: StationId,
        arrival_station: StationId,
    ) -> Result<Self, InvalidTrain> {
        let number = number.trim();
        if number.is_empty() {
            return Err(InvalidTrain {
                reason: "number must not be empty",
            });
        }

        Ok(Self {
            number: number.to_string(),
            departure,
            arrival,
            departure_station,
            arrival_station,
        })
    }
}

/// A persisted train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    /// Store-allocated identifier.
    pub id: TrainId,

    /// Commercial train number, unique across the fleet.
    pub number: String,

    /// Scheduled departure time.
    pub departure: Option<NaiveDateTime>,

    /// Scheduled arrival time.
    pub arrival: Option<NaiveDateTime>,

    /// Station the train departs from.
    pub departure_station: StationId,

    /// Station the train arrives at.
    pub arrival_station: StationId,
}

impl Train {
    /// Attach a store-allocated identifier to a draft.
    pub fn from_draft(id: TrainId, draft: TrainDraft) -> Self {
        Self {
            id,
            number: draft.number,
            departure: draft.departure,
            arrival: draft.arrival,
            departure_station: draft.departure_station,
            arrival_station: draft.arrival_station,
        }
    }

    /// Whether the given station is either endpoint of this train.
    pub fn touches(&self, station: StationId) -> bool {
        self.departure_station == station || self.arrival_station == station
    }
}
