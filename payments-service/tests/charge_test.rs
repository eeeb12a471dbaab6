mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use payments_service::build_router;
use serde_json::json;
use tower::util::ServiceExt;

async fn post_charge(body: &'static str, content_type: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().method("POST").uri("/charge");
    if let Some(content_type) = content_type {
        request = request.header(header::CONTENT_TYPE, content_type);
    }

    let response = build_router()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn charge_echoes_payload() {
    let (status, body) = post_charge(r#"{"foo": "bar"}"#, Some("application/json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "charged", "data": { "foo": "bar" } }));
}

#[tokio::test]
async fn charge_ignores_content_type() {
    let (status, body) = post_charge(r#"{"order_id": "123", "amount": 10.0}"#, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order_id"], "123");
    assert_eq!(body["data"]["amount"], 10.0);
}

#[tokio::test]
async fn charge_echoes_non_object_json() {
    let (status, body) = post_charge("[1, 2, 3]", Some("application/json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "charged", "data": [1, 2, 3] }));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, body) = post_charge("{not json", Some("application/json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid JSON body"));
}

#[tokio::test]
async fn empty_body_is_bad_request() {
    let (status, _) = post_charge("", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn charge_over_http_round_trips() {
    let app = TestApp::spawn().await;

    let response = reqwest::Client::new()
        .post(format!("{}/charge", app.address))
        .header("x-request-id", "req-42")
        .json(&json!({ "order_id": "123", "amount": 25.5 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "req-42");

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "status": "charged", "data": { "order_id": "123", "amount": 25.5 } })
    );
}

#[tokio::test]
async fn get_on_charge_is_method_not_allowed() {
    let response = build_router()
        .oneshot(Request::builder().uri("/charge").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
