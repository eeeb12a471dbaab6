use serde::{Deserialize, Serialize};

/// Query string of `POST /orders/:order_id/charge`.
#[derive(Debug, Default, Deserialize)]
pub struct ChargeParams {
    pub amount: Option<f64>,
}

/// Body forwarded to the payments service through the sidecar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeRequest {
    pub order_id: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChargeInvocationResponse {
    pub invoked: bool,
    pub payments_response: serde_json::Value,
}

impl ChargeInvocationResponse {
    pub fn invoked(payments_response: serde_json::Value) -> Self {
        Self {
            invoked: true,
            payments_response,
        }
    }
}
