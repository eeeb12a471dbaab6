//! HTTP handlers for payments-service.

use crate::dtos::ChargeResponse;
use crate::services::metrics::record_charge;
use axum::{body::Bytes, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

pub const SERVICE_NAME: &str = "payments";

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "ok": true, "service": SERVICE_NAME }))
}

/// Acknowledge a charge by echoing the received JSON.
///
/// The body is parsed whatever its content type; only malformed JSON fails.
pub async fn charge(body: Bytes) -> Result<Json<ChargeResponse>, AppError> {
    let data: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected charge with malformed JSON body");
        AppError::BadRequest(anyhow::anyhow!("Invalid JSON body: {}", e))
    })?;

    record_charge();
    tracing::info!(order_id = ?data.get("order_id"), "Charge acknowledged");

    Ok(Json(ChargeResponse::charged(data)))
}
