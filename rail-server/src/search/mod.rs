//! Multi-criteria train search.
//!
//! Composes an arbitrary subset of optional criteria into a single
//! filtering pass over the train store. Criteria left unset impose no
//! constraint; supplied criteria are AND-ed together.

mod criteria;
mod engine;

pub use criteria::TrainCriteria;
pub use engine::{SearchError, search_trains};
