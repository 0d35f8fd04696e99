//! Application state for the web layer.

use std::sync::Arc;

use crate::service::{StationService, TrainService};
use crate::store::MemoryStore;

/// Shared application state.
///
/// Holds the services plus direct store access for the derived views
/// (search, statistics), which are plain functions over the store.
#[derive(Clone)]
pub struct AppState {
    /// Station CRUD and lookups.
    pub stations: StationService<MemoryStore>,

    /// Train CRUD and lookups.
    pub trains: TrainService<MemoryStore>,

    /// The store itself, for the search and statistics engines.
    pub store: Arc<MemoryStore>,
}

impl AppState {
    /// Create app state around a store.
    pub fn new(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            stations: StationService::new(Arc::clone(&store)),
            trains: TrainService::new(Arc::clone(&store)),
            store,
        }
    }
}
