//! Data-access traits for stations and trains.
//!
//! The engines and services are generic over these traits, so they can
//! be exercised against the bundled in-memory store or a mock. Both
//! traits promise stable creation-order enumeration from their `all_*`
//! methods; no further ordering is guaranteed elsewhere.

use chrono::NaiveDateTime;

use crate::domain::{Station, StationDraft, StationId, Train, TrainDraft, TrainId};

mod memory;

pub use memory::MemoryStore;

/// Infrastructure failure of the underlying store.
///
/// Opaque to clients: the engines pass it through without interpreting
/// or retrying it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("store error: {message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Create a store error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error for a lock poisoned by a panicking writer.
    pub(crate) fn poisoned() -> Self {
        Self::new("store lock poisoned")
    }
}

/// Persistence operations for stations.
pub trait StationStore: Send + Sync {
    /// Look up a station by id.
    fn station(&self, id: StationId) -> Result<Option<Station>, StoreError>;

    /// All stations, in creation order.
    fn all_stations(&self) -> Result<Vec<Station>, StoreError>;

    /// Stations in a city (exact match).
    fn stations_in_city(&self, city: &str) -> Result<Vec<Station>, StoreError>;

    /// Stations whose name contains the fragment, case-insensitively.
    fn stations_named(&self, fragment: &str) -> Result<Vec<Station>, StoreError>;

    /// Stations currently open for traffic.
    fn open_stations(&self) -> Result<Vec<Station>, StoreError>;

    /// Persist a new station, allocating its id.
    fn add_station(&self, draft: StationDraft) -> Result<Station, StoreError>;

    /// Replace the fields of an existing station.
    ///
    /// Returns `None` if the id does not resolve.
    fn update_station(
        &self,
        id: StationId,
        draft: StationDraft,
    ) -> Result<Option<Station>, StoreError>;

    /// Delete a station. Returns whether it existed.
    fn delete_station(&self, id: StationId) -> Result<bool, StoreError>;

    /// Number of stations.
    fn station_count(&self) -> Result<u64, StoreError>;

    /// Whether a station with this id exists.
    fn station_exists(&self, id: StationId) -> Result<bool, StoreError>;
}

/// Persistence operations for trains.
pub trait TrainStore: Send + Sync {
    /// Look up a train by id.
    fn train(&self, id: TrainId) -> Result<Option<Train>, StoreError>;

    /// All trains, in creation order.
    fn all_trains(&self) -> Result<Vec<Train>, StoreError>;

    /// Trains running from one city to another (exact pair match).
    fn trains_between_cities(
        &self,
        departure_city: &str,
        arrival_city: &str,
    ) -> Result<Vec<Train>, StoreError>;

    /// Trains whose number contains the fragment, case-insensitively.
    fn trains_numbered(&self, fragment: &str) -> Result<Vec<Train>, StoreError>;

    /// Trains departing within the inclusive time range.
    fn trains_departing_between(
        &self,
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> Result<Vec<Train>, StoreError>;

    /// Trains that depart from or arrive at the station, each counted once.
    fn trains_touching(&self, station: StationId) -> Result<Vec<Train>, StoreError>;

    /// Persist a new train, allocating its id.
    fn add_train(&self, draft: TrainDraft) -> Result<Train, StoreError>;

    /// Replace the fields of an existing train.
    ///
    /// Returns `None` if the id does not resolve.
    fn update_train(&self, id: TrainId, draft: TrainDraft) -> Result<Option<Train>, StoreError>;

    /// Delete a train. Returns whether it existed.
    fn delete_train(&self, id: TrainId) -> Result<bool, StoreError>;
}
