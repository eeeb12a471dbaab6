//! Service invocation through the sidecar proxy.
//!
//! Calls go to `{proxy_base}/v1.0/invoke/{app_id}/method/{method}`; the
//! sidecar resolves `app_id` to the real service address.

use crate::config::InvocationConfig;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use service_core::error::AppError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("{url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("{url} unreachable: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("{url} returned a non-JSON body: {source}")]
    InvalidResponse {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl InvokeError {
    /// Short label for the `outcome` metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            InvokeError::Timeout { .. } => "timeout",
            InvokeError::Unreachable { .. } | InvokeError::Client(_) => "unreachable",
            InvokeError::Status { .. } => "http_error",
            InvokeError::InvalidResponse { .. } => "invalid_response",
        }
    }
}

impl From<InvokeError> for AppError {
    fn from(err: InvokeError) -> Self {
        match err {
            InvokeError::Timeout { .. } => AppError::GatewayTimeout(err.to_string()),
            InvokeError::Client(e) => AppError::InternalError(e.into()),
            _ => AppError::BadGateway(err.to_string()),
        }
    }
}

/// Client for one target app behind the sidecar.
#[derive(Clone)]
pub struct SidecarInvoker {
    client: Client,
    base_url: String,
    app_id: String,
    timeout: Duration,
}

impl SidecarInvoker {
    pub fn new(config: &InvocationConfig) -> Result<Self, InvokeError> {
        let timeout = config.timeout();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(InvokeError::Client)?;

        Ok(Self {
            client,
            base_url: config.proxy_base_url.trim_end_matches('/').to_string(),
            app_id: config.target_app_id.clone(),
            timeout,
        })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Invocation URL for `method` on the target app.
    pub fn method_url(&self, method: &str) -> String {
        format!(
            "{}/v1.0/invoke/{}/method/{}",
            self.base_url,
            self.app_id,
            method.trim_start_matches('/')
        )
    }

    /// POST `body` as JSON to `method` and return the JSON reply.
    ///
    /// Any non-2xx status is an error; nothing is retried.
    pub async fn invoke<B>(&self, method: &str, body: &B) -> Result<serde_json::Value, InvokeError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.method_url(method);
        tracing::debug!(url = %url, app_id = %self.app_id, "Invoking via sidecar");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.send_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InvokeError::Status { url, status, body });
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
            if e.is_timeout() {
                self.send_error(&url, e)
            } else {
                InvokeError::InvalidResponse { url, source: e }
            }
        })
    }

    fn send_error(&self, url: &str, err: reqwest::Error) -> InvokeError {
        if err.is_timeout() {
            InvokeError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            InvokeError::Unreachable {
                url: url.to_string(),
                source: err,
            }
        }
    }
}
