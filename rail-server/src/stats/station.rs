//! Per-station statistics.

use std::collections::HashMap;

use chrono::Timelike;
use tracing::debug;

use crate::domain::{Station, StationId};
use crate::store::{StationStore, TrainStore};

use super::StatsError;

/// Traffic statistics for one station.
///
/// `total_trains` counts each train touching the station once, even a
/// loop train with the same station at both ends. `total_traffic` is
/// the departure count plus the arrival count, which double-counts that
/// same loop train. Both figures are reported; callers rely on the
/// distinction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStatistics {
    /// The station the statistics describe.
    pub station: Station,

    /// Distinct trains touching the station.
    pub total_trains: u64,

    /// Trains departing from the station.
    pub departures: u64,

    /// Trains arriving at the station.
    pub arrivals: u64,

    /// `departures + arrivals`.
    pub total_traffic: u64,

    /// Departures from this station per hour of day (0–23).
    ///
    /// Present only when at least one train touches the station. Built
    /// from trains departing here that have a departure timestamp.
    pub departures_by_hour: Option<HashMap<u32, u64>>,
}

/// Compute traffic statistics for the given station.
pub fn station_statistics<S>(store: &S, id: StationId) -> Result<StationStatistics, StatsError>
where
    S: StationStore + TrainStore,
{
    let station = store
        .station(id)?
        .ok_or(StatsError::StationNotFound(id))?;

    let trains = store.trains_touching(id)?;

    let departures = trains.iter().filter(|t| t.departure_station == id).count() as u64;
    let arrivals = trains.iter().filter(|t| t.arrival_station == id).count() as u64;

    let departures_by_hour = if trains.is_empty() {
        None
    } else {
        let mut by_hour: HashMap<u32, u64> = HashMap::new();
        for train in &trains {
            if train.departure_station != id {
                continue;
            }
            if let Some(departure) = train.departure {
                *by_hour.entry(departure.hour()).or_insert(0) += 1;
            }
        }
        Some(by_hour)
    };

    debug!(station = %id, trains = trains.len(), "computed station statistics");

    Ok(StationStatistics {
        station,
        total_trains: trains.len() as u64,
        departures,
        arrivals,
        total_traffic: departures + arrivals,
        departures_by_hour,
    })
}
