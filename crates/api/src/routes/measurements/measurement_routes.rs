use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    routes::internal_error, AppState, DateRange, NestedStats, PrecipitationReading,
    TemperatureReading,
};

/// First day of the final twelve months of the dataset (last observation 2017-08-23)
pub const LAST_YEAR_START: &str = "2016-08-23";

/// Station with the most observations in the dataset
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation readings for the last twelve months of data", body = Vec<PrecipitationReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query precipitation")
    ))]
pub async fn get_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationReading>>, (StatusCode, String)> {
    state
        .climate_db
        .precipitation_since(LAST_YEAR_START)
        .await
        .map(Json)
        .map_err(internal_error("precipitation"))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations of the most active station for the last twelve months of data", body = Vec<TemperatureReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query temperature observations")
    ))]
pub async fn get_tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureReading>>, (StatusCode, String)> {
    state
        .climate_db
        .temperature_observations(MOST_ACTIVE_STATION, LAST_YEAR_START)
        .await
        .map(Json)
        .map_err(internal_error("temperature observations"))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
         ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Minimum, average and maximum temperature as [[[min]], [[avg]], [[max]]]", body = Vec<Vec<Vec<f64>>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query temperature statistics")
    ))]
pub async fn get_temperature_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<NestedStats>, (StatusCode, String)> {
    temperature_stats(&state, DateRange::starting(start)).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
         ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
         ("end" = String, Path, description = "Last date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Minimum, average and maximum temperature as [[[min]], [[avg]], [[max]]]", body = Vec<Vec<Vec<f64>>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query temperature statistics")
    ))]
pub async fn get_temperature_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<NestedStats>, (StatusCode, String)> {
    temperature_stats(&state, DateRange::between(start, end)).await
}

async fn temperature_stats(
    state: &AppState,
    range: DateRange,
) -> Result<Json<NestedStats>, (StatusCode, String)> {
    state
        .climate_db
        .temperature_stats(&range)
        .await
        .map(|stats| Json(stats.nested()))
        .map_err(internal_error("temperature statistics"))
}
