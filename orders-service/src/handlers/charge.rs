use crate::dtos::{ChargeInvocationResponse, ChargeParams, ChargeRequest};
use crate::services::metrics::record_invocation;
use crate::startup::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use service_core::error::AppError;

/// Sidecar method invoked on the payments app.
pub const CHARGE_METHOD: &str = "charge";

/// Charge an order by invoking the payments app through the sidecar.
pub async fn charge_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    params: Result<Query<ChargeParams>, QueryRejection>,
) -> Result<Json<ChargeInvocationResponse>, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.body_text())))?;

    let amount = params.amount.unwrap_or(state.config.charge.default_amount);
    if !amount.is_finite() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "amount must be a finite number"
        )));
    }

    let request = ChargeRequest { order_id, amount };

    match state.invoker.invoke(CHARGE_METHOD, &request).await {
        Ok(payments_response) => {
            record_invocation(state.invoker.app_id(), "success");
            tracing::info!(order_id = %request.order_id, amount, "Order charged");
            Ok(Json(ChargeInvocationResponse::invoked(payments_response)))
        }
        Err(e) => {
            record_invocation(state.invoker.app_id(), e.outcome());
            tracing::error!(order_id = %request.order_id, error = %e, "Charge invocation failed");
            Err(e.into())
        }
    }
}
