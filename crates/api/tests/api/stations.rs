use crate::helpers::{seeded_store, spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use climate_api::Error;
use std::sync::Arc;

#[tokio::test]
async fn stations_returns_flat_list_of_identifiers() {
    let mut climate_db = MockClimateAccess::new();
    climate_db.expect_station_ids().times(1).returning(|| {
        Ok(vec![
            "USC00519397".to_string(),
            "USC00513117".to_string(),
            "USC00514830".to_string(),
        ])
    });

    let test_app = spawn_app(Arc::new(climate_db));
    let (status, body) = test_app.get("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"["USC00519397","USC00513117","USC00514830"]"#);
}

#[tokio::test]
async fn empty_station_table_returns_empty_array() {
    let store = seeded_store(&[], &[]).await;

    let test_app = spawn_app(store);
    let (status, body) = test_app.get("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn stations_keeps_one_entry_per_row() {
    let store = seeded_store(&[], &["USC00519397", "USC00519281", "USC00519397"]).await;

    let test_app = spawn_app(store);
    let (_, body) = test_app.get("/api/v1.0/stations").await;

    let stations: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(stations, vec!["USC00519397", "USC00519281", "USC00519397"]);
}

#[tokio::test]
async fn store_failure_is_a_server_error() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_station_ids()
        .times(1)
        .returning(|| Err(Error::Query(sqlx::Error::PoolClosed)));

    let test_app = spawn_app(Arc::new(climate_db));
    let (status, _) = test_app.get("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
