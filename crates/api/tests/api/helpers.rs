use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use climate_api::{
    app, AppState, ClimateData, ClimateStore, DateRange, Error, PrecipitationReading,
    TemperatureReading, TemperatureStats,
};
use hyper::{header, Method};
use mockall::mock;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

mock! {
    pub ClimateAccess {}
    #[async_trait]
    impl ClimateData for ClimateAccess {
        async fn precipitation_since(&self, since: &str) -> Result<Vec<PrecipitationReading>, Error>;
        async fn station_ids(&self) -> Result<Vec<String>, Error>;
        async fn temperature_observations(
            &self,
            station: &str,
            since: &str,
        ) -> Result<Vec<TemperatureReading>, Error>;
        async fn temperature_stats(&self, range: &DateRange) -> Result<TemperatureStats, Error>;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub fn spawn_app(climate_db: Arc<dyn ClimateData>) -> TestApp {
    TestApp {
        app: app(AppState { climate_db }),
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();

        let response = self.send(request).await;

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }
}

/// In-memory store shaped like the Hawaii dataset
pub async fn seeded_store(
    measurements: &[(&str, &str, Option<f64>, f64)],
    stations: &[&str],
) -> Arc<ClimateStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::raw_sql(
        "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT);
         CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, latitude FLOAT, longitude FLOAT, elevation FLOAT);",
    )
    .execute(&pool)
    .await
    .unwrap();

    for (date, station, prcp, tobs) in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(*station)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(&pool)
            .await
            .unwrap();
    }
    for station in stations {
        sqlx::query("INSERT INTO station (station) VALUES (?)")
            .bind(*station)
            .execute(&pool)
            .await
            .unwrap();
    }

    let store = ClimateStore::from_pool(pool);
    store.verify_schema().await.unwrap();
    Arc::new(store)
}
