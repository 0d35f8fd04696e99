//! Train CRUD, lookups, and the trip duration operation.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use tracing::info;

use crate::domain::{StationId, Train, TrainDraft, TrainId, TripDuration};
use crate::store::{StationStore, TrainStore};

use super::ServiceError;

/// Caller-supplied train fields.
///
/// Endpoint stations are referenced by id and must exist at write time.
#[derive(Debug, Clone)]
pub struct TrainInput {
    pub number: String,
    pub departure: Option<NaiveDateTime>,
    pub arrival: Option<NaiveDateTime>,
    pub departure_station: StationId,
    pub arrival_station: StationId,
}

/// A train together with its computed trip duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripDetails {
    pub train: Train,
    pub duration: TripDuration,
}

/// Train operations over the stores.
#[derive(Debug)]
pub struct TrainService<S> {
    store: Arc<S>,
}

impl<S> Clone for TrainService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: StationStore + TrainStore> TrainService<S> {
    /// Create a service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a train.
    ///
    /// Both endpoint stations must exist and the number must not be in
    /// use by another train.
    pub fn create(&self, input: TrainInput) -> Result<Train, ServiceError> {
        let draft = TrainDraft::new(
            &input.number,
            input.departure,
            input.arrival,
            input.departure_station,
            input.arrival_station,
        )?;
        self.ensure_station(draft.departure_station)?;
        self.ensure_station(draft.arrival_station)?;
        self.ensure_number_free(&draft.number, None)?;

        let train = self.store.add_train(draft)?;
        info!(id = %train.id, number = %train.number, "train created");
        Ok(train)
    }

    /// Fetch a train by id.
    pub fn get(&self, id: TrainId) -> Result<Train, ServiceError> {
        self.store.train(id)?.ok_or(ServiceError::TrainNotFound(id))
    }

    /// All trains, in creation order.
    pub fn list(&self) -> Result<Vec<Train>, ServiceError> {
        Ok(self.store.all_trains()?)
    }

    /// Replace a train's fields, re-resolving its endpoints.
    pub fn update(&self, id: TrainId, input: TrainInput) -> Result<Train, ServiceError> {
        // Existence first, so an unknown train id reads as not-found
        // rather than a validation problem with the payload.
        self.get(id)?;

        let draft = TrainDraft::new(
            &input.number,
            input.departure,
            input.arrival,
            input.departure_station,
            input.arrival_station,
        )?;
        self.ensure_station(draft.departure_station)?;
        self.ensure_station(draft.arrival_station)?;
        self.ensure_number_free(&draft.number, Some(id))?;

        self.store
            .update_train(id, draft)?
            .ok_or(ServiceError::TrainNotFound(id))
    }

    /// Delete a train.
    pub fn delete(&self, id: TrainId) -> Result<(), ServiceError> {
        if !self.store.delete_train(id)? {
            return Err(ServiceError::TrainNotFound(id));
        }
        info!(id = %id, "train deleted");
        Ok(())
    }

    /// Trains running from one city to another (exact pair match).
    pub fn between_cities(
        &self,
        departure_city: &str,
        arrival_city: &str,
    ) -> Result<Vec<Train>, ServiceError> {
        Ok(self
            .store
            .trains_between_cities(departure_city, arrival_city)?)
    }

    /// Trains departing from or arriving at the station.
    pub fn touching_station(&self, station: StationId) -> Result<Vec<Train>, ServiceError> {
        Ok(self.store.trains_touching(station)?)
    }

    /// Trains whose number contains the fragment, case-insensitively.
    pub fn numbered(&self, fragment: &str) -> Result<Vec<Train>, ServiceError> {
        Ok(self.store.trains_numbered(fragment)?)
    }

    /// Trains departing within the 24 hours following `now`.
    pub fn departing_soon(&self, now: NaiveDateTime) -> Result<Vec<Train>, ServiceError> {
        Ok(self
            .store
            .trains_departing_between(now, now + Duration::hours(24))?)
    }

    /// Compute the trip duration of a train.
    ///
    /// Absent or unordered timestamps surface as validation errors.
    pub fn trip_duration(&self, id: TrainId) -> Result<TripDetails, ServiceError> {
        let train = self.get(id)?;
        let duration = TripDuration::between(train.departure, train.arrival)?;
        Ok(TripDetails { train, duration })
    }

    fn ensure_station(&self, id: StationId) -> Result<(), ServiceError> {
        if !self.store.station_exists(id)? {
            return Err(ServiceError::StationNotFound(id));
        }
        Ok(())
    }

    fn ensure_number_free(
        &self,
        number: &str,
        allow: Option<TrainId>,
    ) -> Result<(), ServiceError> {
        let taken = self
            .store
            .all_trains()?
            .iter()
            .any(|t| t.number == number && Some(t.id) != allow);
        if taken {
            return Err(ServiceError::Validation(format!(
                "train number '{number}' is already in use"
            )));
        }
        Ok(())
    }
}
