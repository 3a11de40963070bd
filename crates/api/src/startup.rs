use crate::{
    db, get_precipitation, get_stations, get_temperature_from, get_temperature_range, get_tobs,
    index_handler, routes, ClimateData, ClimateStore,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use climate_core::{is_file, path_exists};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub climate_db: Arc<dyn ClimateData>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::measurements::measurement_routes::get_precipitation,
        routes::stations::station_routes::get_stations,
        routes::measurements::measurement_routes::get_tobs,
        routes::measurements::measurement_routes::get_temperature_from,
        routes::measurements::measurement_routes::get_temperature_range,
    ),
    components(
        schemas(
                db::PrecipitationReading,
                db::TemperatureReading,
        )
    ),
    tags(
        (name = "hawaii climate api", description = "read-only access to Hawaii weather station precipitation and temperature measurements")
    )
)]
struct ApiDoc;

/// Open the measurement database, refusing to start on a missing file or unexpected schema.
pub async fn build_store(
    database: &str,
    max_connections: u32,
) -> Result<Arc<ClimateStore>, anyhow::Error> {
    if !path_exists(database) {
        return Err(anyhow!("database file not found: {}", database));
    }
    if !is_file(database) {
        return Err(anyhow!("database path is not a file: {}", database));
    }

    let store = ClimateStore::connect(database, max_connections)
        .await
        .map_err(|e| anyhow!("error binding SQLite database {}: {}", database, e))?;

    Ok(Arc::new(store))
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(get_precipitation))
        .route("/api/v1.0/stations", get(get_stations))
        .route("/api/v1.0/tobs", get(get_tobs))
        .route("/api/v1.0/{start}", get(get_temperature_from))
        .route("/api/v1.0/{start}/{end}", get(get_temperature_range))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
