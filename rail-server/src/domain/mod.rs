//! Domain types for the rail network directory.
//!
//! The entity types validate their invariants at construction time, so
//! code that receives a `Station` or `Train` can trust its fields.

mod duration;
mod station;
mod train;

pub use duration::{DurationError, TripDuration};
pub use station::{InvalidStation, Station, StationDraft, StationId};
pub use train::{InvalidTrain, Train, TrainDraft, TrainId};
