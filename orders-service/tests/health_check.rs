mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{test_config, TestApp};
use orders_service::{build_router, AppState};
use reqwest::Client;
use tower::util::ServiceExt;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn(test_config("http://127.0.0.1:3500")).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, serde_json::json!({ "ok": true, "service": "orders" }));
}

#[tokio::test]
async fn health_check_works_in_process() {
    let state = AppState::new(test_config("http://127.0.0.1:3500")).unwrap();
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = TestApp::spawn(test_config("http://127.0.0.1:3500")).await;

    let response = Client::new()
        .get(format!("{}/orders", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_format() {
    let app = TestApp::spawn(test_config("http://127.0.0.1:3500")).await;
    let client = Client::new();

    // At least one request so the counters exist
    client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    let response = client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type header")
        .to_str()
        .expect("Invalid content-type");
    assert!(content_type.starts_with("text/plain"));

    let body = response.text().await.expect("Failed to get response body");
    assert!(!body.is_empty());
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("handler=\"/health\""));
    assert!(body.contains("status=\"2xx\""));
}
