//! Station CRUD and lookups.

use std::sync::Arc;

use tracing::info;

use crate::domain::{Station, StationDraft, StationId};
use crate::store::StationStore;

use super::ServiceError;

/// Caller-supplied station fields.
///
/// `tracks` and `is_open` are optional: on creation the domain defaults
/// apply (1 track, open); on update the station's current values are
/// kept.
#[derive(Debug, Clone, Default)]
pub struct StationInput {
    pub name: String,
    pub city: String,
    pub tracks: Option<u32>,
    pub is_open: Option<bool>,
}

/// Station operations over a [`StationStore`].
#[derive(Debug)]
pub struct StationService<S> {
    store: Arc<S>,
}

impl<S> Clone for StationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: StationStore> StationService<S> {
    /// Create a service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a station, applying the domain defaults.
    pub fn create(&self, input: StationInput) -> Result<Station, ServiceError> {
        let draft = StationDraft::new(&input.name, &input.city, input.tracks, input.is_open)?;
        let station = self.store.add_station(draft)?;
        info!(id = %station.id, name = %station.name, "station created");
        Ok(station)
    }

    /// Create several stations at once.
    ///
    /// All inputs are validated before any is persisted, so a bad entry
    /// rejects the whole batch.
    pub fn create_many(&self, inputs: Vec<StationInput>) -> Result<Vec<Station>, ServiceError> {
        let drafts = inputs
            .into_iter()
            .map(|i| StationDraft::new(&i.name, &i.city, i.tracks, i.is_open))
            .collect::<Result<Vec<_>, _>>()?;

        let mut stations = Vec::with_capacity(drafts.len());
        for draft in drafts {
            stations.push(self.store.add_station(draft)?);
        }
        info!(count = stations.len(), "stations created in batch");
        Ok(stations)
    }

    /// Fetch a station by id.
    pub fn get(&self, id: StationId) -> Result<Station, ServiceError> {
        self.store
            .station(id)?
            .ok_or(ServiceError::StationNotFound(id))
    }

    /// All stations, in creation order.
    pub fn list(&self) -> Result<Vec<Station>, ServiceError> {
        Ok(self.store.all_stations()?)
    }

    /// Replace a station's fields, keeping current values where the
    /// input leaves them unset.
    pub fn update(&self, id: StationId, input: StationInput) -> Result<Station, ServiceError> {
        let current = self.get(id)?;
        let draft = StationDraft::new(
            &input.name,
            &input.city,
            Some(input.tracks.unwrap_or(current.tracks)),
            Some(input.is_open.unwrap_or(current.is_open)),
        )?;
        self.store
            .update_station(id, draft)?
            .ok_or(ServiceError::StationNotFound(id))
    }

    /// Open or close a station without touching its other fields.
    pub fn set_open(&self, id: StationId, is_open: bool) -> Result<Station, ServiceError> {
        let current = self.get(id)?;
        let draft = StationDraft::new(
            &current.name,
            &current.city,
            Some(current.tracks),
            Some(is_open),
        )?;
        self.store
            .update_station(id, draft)?
            .ok_or(ServiceError::StationNotFound(id))
    }

    /// Delete a station (and, per store policy, its dependent trains).
    pub fn delete(&self, id: StationId) -> Result<(), ServiceError> {
        if !self.store.delete_station(id)? {
            return Err(ServiceError::StationNotFound(id));
        }
        info!(id = %id, "station deleted");
        Ok(())
    }

    /// Stations in a city (exact match).
    pub fn in_city(&self, city: &str) -> Result<Vec<Station>, ServiceError> {
        Ok(self.store.stations_in_city(city)?)
    }

    /// Stations in a region.
    ///
    /// Regions are currently an alias for cities; the network model has
    /// no separate region field.
    pub fn in_region(&self, region: &str) -> Result<Vec<Station>, ServiceError> {
        self.in_city(region)
    }

    /// Stations whose name contains the fragment, case-insensitively.
    pub fn named(&self, fragment: &str) -> Result<Vec<Station>, ServiceError> {
        Ok(self.store.stations_named(fragment)?)
    }

    /// Stations open for traffic.
    pub fn open(&self) -> Result<Vec<Station>, ServiceError> {
        Ok(self.store.open_stations()?)
    }

    /// Stations with at least the given number of tracks.
    pub fn with_min_tracks(&self, min: u32) -> Result<Vec<Station>, ServiceError> {
        let stations = self.store.all_stations()?;
        Ok(stations.into_iter().filter(|s| s.tracks >= min).collect())
    }

    /// Number of stations.
    pub fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.store.station_count()?)
    }

    /// Whether a station with this id exists.
    pub fn exists(&self, id: StationId) -> Result<bool, ServiceError> {
        Ok(self.store.station_exists(id)?)
    }
}
