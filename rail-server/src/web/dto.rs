//! Data transfer objects for web requests and responses.
//!
//! Field names are camelCase on the wire; timestamps are ISO-8601
//! datetimes without a zone.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{Station, StationId, Train, TrainId};
use crate::search::TrainCriteria;
use crate::service::{StationInput, TrainInput, TripDetails};
use crate::stats::{NetworkStatistics, StationStatistics};

/// Request body for creating or replacing a station.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationPayload {
    /// Station name.
    pub name: String,

    /// City the station serves.
    pub city: String,

    /// Number of tracks (defaults to 1 on creation).
    pub tracks: Option<u32>,

    /// Open status (defaults to open on creation).
    pub is_open: Option<bool>,
}

impl From<StationPayload> for StationInput {
    fn from(p: StationPayload) -> Self {
        StationInput {
            name: p.name,
            city: p.city,
            tracks: p.tracks,
            is_open: p.is_open,
        }
    }
}

/// Request body for the status-only station update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationStatusPayload {
    /// New open status.
    pub is_open: bool,
}

/// Request body for creating or replacing a train.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainPayload {
    /// Commercial train number.
    pub number: String,

    /// Scheduled departure time.
    pub departure: Option<NaiveDateTime>,

    /// Scheduled arrival time.
    pub arrival: Option<NaiveDateTime>,

    /// Id of the departure station.
    pub departure_station_id: StationId,

    /// Id of the arrival station.
    pub arrival_station_id: StationId,
}

impl From<TrainPayload> for TrainInput {
    fn from(p: TrainPayload) -> Self {
        TrainInput {
            number: p.number,
            departure: p.departure,
            arrival: p.arrival,
            departure_station: p.departure_station_id,
            arrival_station: p.arrival_station_id,
        }
    }
}

/// Query parameters for station name search.
#[derive(Debug, Deserialize)]
pub struct StationNameQuery {
    /// Name fragment to look for.
    pub name: String,
}

/// Query parameters for the city-pair route lookup.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Departure city.
    pub from: String,

    /// Arrival city.
    pub to: String,
}

/// Query parameters for the advanced train search.
///
/// Every parameter is optional; omitted parameters impose no
/// constraint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainSearchQuery {
    /// Departure city, compared case-insensitively.
    pub departure_city: Option<String>,

    /// Arrival city, compared case-insensitively.
    pub arrival_city: Option<String>,

    /// Inclusive lower bound on the departure time.
    pub start_date: Option<NaiveDateTime>,

    /// Inclusive upper bound on the departure time.
    pub end_date: Option<NaiveDateTime>,

    /// Inclusive upper bound on trip duration, in minutes.
    pub max_duration_minutes: Option<i64>,

    /// Require both endpoint stations to be open.
    pub open_stations_only: Option<bool>,
}

impl From<TrainSearchQuery> for TrainCriteria {
    fn from(q: TrainSearchQuery) -> Self {
        TrainCriteria {
            departure_city: q.departure_city,
            arrival_city: q.arrival_city,
            departing_from: q.start_date,
            departing_until: q.end_date,
            max_duration_mins: q.max_duration_minutes,
            open_stations_only: q.open_stations_only.unwrap_or(false),
        }
    }
}

/// A station in responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResult {
    pub id: StationId,
    pub name: String,
    pub city: String,
    pub tracks: u32,
    pub is_open: bool,
}

impl StationResult {
    pub fn from_station(station: Station) -> Self {
        Self {
            id: station.id,
            name: station.name,
            city: station.city,
            tracks: station.tracks,
            is_open: station.is_open,
        }
    }
}

/// A train in responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainResult {
    pub id: TrainId,
    pub number: String,
    pub departure: Option<NaiveDateTime>,
    pub arrival: Option<NaiveDateTime>,
    pub departure_station_id: StationId,
    pub arrival_station_id: StationId,
}

impl TrainResult {
    pub fn from_train(train: Train) -> Self {
        Self {
            id: train.id,
            number: train.number,
            departure: train.departure,
            arrival: train.arrival,
            departure_station_id: train.departure_station,
            arrival_station_id: train.arrival_station,
        }
    }
}

/// Response for the trip duration endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDurationResult {
    pub train_id: TrainId,
    pub number: String,
    pub departure: Option<NaiveDateTime>,
    pub arrival: Option<NaiveDateTime>,
    pub minutes: i64,
    pub hours: i64,
    pub formatted: String,
}

impl TripDurationResult {
    pub fn from_details(details: TripDetails) -> Self {
        Self {
            train_id: details.train.id,
            number: details.train.number,
            departure: details.train.departure,
            arrival: details.train.arrival,
            minutes: details.duration.minutes,
            hours: details.duration.hours,
            formatted: details.duration.format(),
        }
    }
}

/// Response for per-station statistics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationStatisticsResult {
    pub station_id: StationId,
    pub name: String,
    pub city: String,
    pub tracks: u32,
    pub is_open: bool,
    pub total_trains: u64,
    pub departures: u64,
    pub arrivals: u64,
    pub total_traffic: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departures_by_hour: Option<HashMap<u32, u64>>,
}

impl StationStatisticsResult {
    pub fn from_stats(stats: StationStatistics) -> Self {
        Self {
            station_id: stats.station.id,
            name: stats.station.name,
            city: stats.station.city,
            tracks: stats.station.tracks,
            is_open: stats.station.is_open,
            total_trains: stats.total_trains,
            departures: stats.departures,
            arrivals: stats.arrivals,
            total_traffic: stats.total_traffic,
            departures_by_hour: stats.departures_by_hour,
        }
    }
}

/// Response for global statistics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatisticsResult {
    pub total_stations: u64,
    pub open_stations: u64,
    pub closed_stations: u64,
    pub total_tracks: u64,
    pub mean_tracks: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busiest_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busiest_city_stations: Option<u64>,
    pub stations_per_city: HashMap<String, u64>,
}

impl NetworkStatisticsResult {
    pub fn from_stats(stats: NetworkStatistics) -> Self {
        let (busiest_city, busiest_city_stations) = match stats.busiest_city {
            Some(busiest) => (Some(busiest.city), Some(busiest.stations)),
            None => (None, None),
        };
        Self {
            total_stations: stats.total_stations,
            open_stations: stats.open_stations,
            closed_stations: stats.closed_stations,
            total_tracks: stats.total_tracks,
            mean_tracks: stats.mean_tracks,
            busiest_city,
            busiest_city_stations,
            stations_per_city: stats.stations_per_city,
        }
    }
}

/// Response for deletions.
#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub deleted: bool,
    pub id: u64,
}

/// Response for the station count endpoint.
#[derive(Debug, Serialize)]
pub struct CountResult {
    pub count: u64,
}

/// Response for the station existence endpoint.
#[derive(Debug, Serialize)]
pub struct ExistsResult {
    pub exists: bool,
}

/// Error payload returned with non-2xx statuses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
