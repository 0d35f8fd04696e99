//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::Local;
use tracing::warn;

use crate::domain::{StationId, TrainId};
use crate::search::{SearchError, TrainCriteria, search_trains};
use crate::service::ServiceError;
use crate::stats::{StatsError, network_statistics, station_statistics};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations).post(create_station))
        .route("/api/stations/batch", post(create_stations_batch))
        .route("/api/stations/statistics", get(global_statistics))
        .route("/api/stations/count", get(count_stations))
        .route("/api/stations/open", get(open_stations))
        .route("/api/stations/search", get(search_stations_by_name))
        .route("/api/stations/city/:city", get(stations_by_city))
        .route("/api/stations/region/:region", get(stations_by_region))
        .route("/api/stations/min-tracks/:min", get(stations_by_min_tracks))
        .route(
            "/api/stations/:id",
            get(get_station).put(update_station).delete(delete_station),
        )
        .route("/api/stations/:id/status", patch(set_station_status))
        .route("/api/stations/:id/exists", get(station_exists))
        .route("/api/stations/:id/statistics", get(station_stats))
        .route("/api/trains", get(list_trains).post(create_train))
        .route("/api/trains/search", get(advanced_train_search))
        .route("/api/trains/route", get(trains_by_route))
        .route("/api/trains/upcoming", get(upcoming_trains))
        .route("/api/trains/number/:fragment", get(trains_by_number))
        .route("/api/trains/station/:station_id", get(trains_by_station))
        .route(
            "/api/trains/:id",
            get(get_train).put(update_train).delete(delete_train),
        )
        .route("/api/trains/:id/duration", get(train_duration))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn station_results(stations: Vec<crate::domain::Station>) -> Json<Vec<StationResult>> {
    Json(stations.into_iter().map(StationResult::from_station).collect())
}

fn train_results(trains: Vec<crate::domain::Train>) -> Json<Vec<TrainResult>> {
    Json(trains.into_iter().map(TrainResult::from_train).collect())
}

// ---- stations ----

async fn list_stations(State(state): State<AppState>) -> Result<Json<Vec<StationResult>>, AppError> {
    Ok(station_results(state.stations.list()?))
}

async fn create_station(
    State(state): State<AppState>,
    Json(payload): Json<StationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let station = state.stations.create(payload.into())?;
    Ok((
        StatusCode::CREATED,
        Json(StationResult::from_station(station)),
    ))
}

async fn create_stations_batch(
    State(state): State<AppState>,
    Json(payloads): Json<Vec<StationPayload>>,
) -> Result<impl IntoResponse, AppError> {
    let inputs = payloads.into_iter().map(Into::into).collect();
    let stations = state.stations.create_many(inputs)?;
    Ok((StatusCode::CREATED, station_results(stations)))
}

async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<StationResult>, AppError> {
    let station = state.stations.get(StationId::new(id))?;
    Ok(Json(StationResult::from_station(station)))
}

async fn update_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<StationPayload>,
) -> Result<Json<StationResult>, AppError> {
    let station = state.stations.update(StationId::new(id), payload.into())?;
    Ok(Json(StationResult::from_station(station)))
}

async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResult>, AppError> {
    state.stations.delete(StationId::new(id))?;
    Ok(Json(DeleteResult { deleted: true, id }))
}

async fn set_station_status(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<StationStatusPayload>,
) -> Result<Json<StationResult>, AppError> {
    let station = state
        .stations
        .set_open(StationId::new(id), payload.is_open)?;
    Ok(Json(StationResult::from_station(station)))
}

async fn stations_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<Vec<StationResult>>, AppError> {
    Ok(station_results(state.stations.in_city(&city)?))
}

async fn stations_by_region(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Result<Json<Vec<StationResult>>, AppError> {
    Ok(station_results(state.stations.in_region(&region)?))
}

async fn search_stations_by_name(
    State(state): State<AppState>,
    Query(query): Query<StationNameQuery>,
) -> Result<Json<Vec<StationResult>>, AppError> {
    Ok(station_results(state.stations.named(&query.name)?))
}

async fn open_stations(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationResult>>, AppError> {
    Ok(station_results(state.stations.open()?))
}

async fn stations_by_min_tracks(
    State(state): State<AppState>,
    Path(min): Path<u32>,
) -> Result<Json<Vec<StationResult>>, AppError> {
    Ok(station_results(state.stations.with_min_tracks(min)?))
}

async fn count_stations(State(state): State<AppState>) -> Result<Json<CountResult>, AppError> {
    Ok(Json(CountResult {
        count: state.stations.count()?,
    }))
}

async fn station_exists(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ExistsResult>, AppError> {
    Ok(Json(ExistsResult {
        exists: state.stations.exists(StationId::new(id))?,
    }))
}

async fn station_stats(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<StationStatisticsResult>, AppError> {
    let stats = station_statistics(state.store.as_ref(), StationId::new(id))?;
    Ok(Json(StationStatisticsResult::from_stats(stats)))
}

async fn global_statistics(
    State(state): State<AppState>,
) -> Result<Json<NetworkStatisticsResult>, AppError> {
    let stats = network_statistics(state.store.as_ref())?;
    Ok(Json(NetworkStatisticsResult::from_stats(stats)))
}

// ---- trains ----

async fn list_trains(State(state): State<AppState>) -> Result<Json<Vec<TrainResult>>, AppError> {
    Ok(train_results(state.trains.list()?))
}

async fn create_train(
    State(state): State<AppState>,
    Json(payload): Json<TrainPayload>,
) -> Result<impl IntoResponse, AppError> {
    let train = state.trains.create(payload.into())?;
    Ok((StatusCode::CREATED, Json(TrainResult::from_train(train))))
}

async fn get_train(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TrainResult>, AppError> {
    let train = state.trains.get(TrainId::new(id))?;
    Ok(Json(TrainResult::from_train(train)))
}

async fn update_train(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<TrainPayload>,
) -> Result<Json<TrainResult>, AppError> {
    let train = state.trains.update(TrainId::new(id), payload.into())?;
    Ok(Json(TrainResult::from_train(train)))
}

async fn delete_train(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResult>, AppError> {
    state.trains.delete(TrainId::new(id))?;
    Ok(Json(DeleteResult { deleted: true, id }))
}

async fn advanced_train_search(
    State(state): State<AppState>,
    Query(query): Query<TrainSearchQuery>,
) -> Result<Json<Vec<TrainResult>>, AppError> {
    let criteria = TrainCriteria::from(query);
    let trains = search_trains(state.store.as_ref(), &criteria)?;
    Ok(train_results(trains))
}

async fn trains_by_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<Vec<TrainResult>>, AppError> {
    Ok(train_results(
        state.trains.between_cities(&query.from, &query.to)?,
    ))
}

async fn trains_by_station(
    State(state): State<AppState>,
    Path(station_id): Path<u64>,
) -> Result<Json<Vec<TrainResult>>, AppError> {
    Ok(train_results(
        state.trains.touching_station(StationId::new(station_id))?,
    ))
}

async fn trains_by_number(
    State(state): State<AppState>,
    Path(fragment): Path<String>,
) -> Result<Json<Vec<TrainResult>>, AppError> {
    Ok(train_results(state.trains.numbered(&fragment)?))
}

async fn upcoming_trains(
    State(state): State<AppState>,
) -> Result<Json<Vec<TrainResult>>, AppError> {
    let now = Local::now().naive_local();
    Ok(train_results(state.trains.departing_soon(now)?))
}

async fn train_duration(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TripDurationResult>, AppError> {
    let details = state.trains.trip_duration(TrainId::new(id))?;
    Ok(Json(TripDurationResult::from_details(details)))
}

/// Application-level error, mapped to an HTTP status.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::StationNotFound(_) | ServiceError::TrainNotFound(_) => {
                AppError::NotFound {
                    message: e.to_string(),
                }
            }
            ServiceError::Validation(message) => AppError::BadRequest { message },
            ServiceError::Store(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<StatsError> for AppError {
    fn from(e: StatsError) -> Self {
        match e {
            StatsError::StationNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            StatsError::Store(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use crate::store::StoreError;

    #[test]
    fn service_errors_map_to_statuses() {
        let not_found: AppError = ServiceError::StationNotFound(StationId::new(9)).into();
        assert!(matches!(not_found, AppError::NotFound { .. }));

        let bad: AppError = ServiceError::Validation("no".into()).into();
        assert!(matches!(bad, AppError::BadRequest { .. }));

        let internal: AppError = ServiceError::Store(StoreError::new("down")).into();
        assert!(matches!(internal, AppError::Internal { .. }));
    }

    #[test]
    fn stats_not_found_maps_to_404() {
        let err: AppError = StatsError::StationNotFound(StationId::new(1)).into();
        match err {
            AppError::NotFound { message } => assert!(message.contains("station not found")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn search_errors_are_internal() {
        let err: AppError = SearchError::Store(StoreError::new("down")).into();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
