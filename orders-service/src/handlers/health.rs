use axum::{response::IntoResponse, Json};
use serde_json::json;

pub const SERVICE_NAME: &str = "orders";

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "ok": true, "service": SERVICE_NAME }))
}
