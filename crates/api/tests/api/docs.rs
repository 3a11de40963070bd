use crate::helpers::{spawn_app, MockClimateAccess};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use hyper::{header, Method};
use std::sync::Arc;

#[tokio::test]
async fn docs_page_serves_html() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new()));

    let (status, body) = test_app.get("/docs").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.to_lowercase().contains("<html"));
}

#[tokio::test]
async fn preflight_allows_any_origin() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new()));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1.0/stations")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let response = test_app.send(request).await;

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn simple_get_carries_allow_origin() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_station_ids()
        .times(1)
        .returning(|| Ok(vec![]));
    let test_app = spawn_app(Arc::new(climate_db));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1.0/stations")
        .header(header::ORIGIN, "https://example.com")
        .body(Body::empty())
        .unwrap();

    let response = test_app.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
