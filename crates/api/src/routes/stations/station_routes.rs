use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::{routes::internal_error, AppState};

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Identifier of every station, in store order", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query stations")
    ))]
pub async fn get_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    state
        .climate_db
        .station_ids()
        .await
        .map(Json)
        .map_err(internal_error("stations"))
}
