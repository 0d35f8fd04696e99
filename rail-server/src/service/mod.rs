//! CRUD services over the stores.
//!
//! Thin orchestration: domain validation, write-time resolution of
//! station references, and the lookup helpers the HTTP surface exposes.
//! Derived views (search, statistics) live in their own modules.

mod stations;
mod trains;

pub use stations::{StationInput, StationService};
pub use trains::{TrainInput, TrainService, TripDetails};

use crate::domain::{
    DurationError, InvalidStation, InvalidTrain, StationId, TrainId,
};
use crate::store::StoreError;

/// Error from a service operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The referenced station does not exist.
    #[error("station not found: {0}")]
    StationNotFound(StationId),

    /// The referenced train does not exist.
    #[error("train not found: {0}")]
    TrainNotFound(TrainId),

    /// Malformed or logically inconsistent input.
    #[error("{0}")]
    Validation(String),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<InvalidStation> for ServiceError {
    fn from(e: InvalidStation) -> Self {
        ServiceError::Validation(e.to_string())
    }
}

impl From<InvalidTrain> for ServiceError {
    fn from(e: InvalidTrain) -> Self {
        ServiceError::Validation(e.to_string())
    }
}

impl From<DurationError> for ServiceError {
    fn from(e: DurationError) -> Self {
        ServiceError::Validation(e.to_string())
    }
}
