//! Station traffic statistics.
//!
//! Pure aggregation over store snapshots: per-station traffic counts
//! with an hourly departure histogram, and fleet-wide totals across all
//! stations.

mod network;
mod station;

pub use network::{BusiestCity, NetworkStatistics, network_statistics};
pub use station::{StationStatistics, station_statistics};

use crate::domain::StationId;
use crate::store::StoreError;

/// Error from a statistics computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// The requested station id does not resolve.
    #[error("station not found: {0}")]
    StationNotFound(StationId),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
