use serde::{Deserialize, Serialize};

pub const CHARGED: &str = "charged";

/// Acknowledgment returned for every forwarded charge.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChargeResponse {
    pub status: String,
    pub data: serde_json::Value,
}

impl ChargeResponse {
    pub fn charged(data: serde_json::Value) -> Self {
        Self {
            status: CHARGED.to_string(),
            data,
        }
    }
}
