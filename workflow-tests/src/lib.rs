//! Cross-service workflow integration tests library.
//!
//! Runs both services in-process on random ports together with a stub
//! sidecar that resolves app ids to local addresses, so a charge travels
//! client -> orders -> sidecar -> payments the same way it does when deployed.
//!
//! ## Usage
//!
//! ```bash
//! cargo test -p workflow-tests
//! ```

use anyhow::{anyhow, Result};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use orders_service::config::{ChargeConfig, InvocationConfig, OrdersConfig};
use serde_json::json;
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::net::TcpListener;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,workflow_tests=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[derive(Clone)]
struct SidecarState {
    routes: Arc<HashMap<String, String>>,
    client: reqwest::Client,
}

/// Forward `/v1.0/invoke/{app_id}/method/{method}` to `{route}/{method}`.
async fn invoke(
    State(state): State<SidecarState>,
    Path((app_id, method_path)): Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(base) = state.routes.get(&app_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "errorCode": "ERR_DIRECT_INVOKE",
                "message": format!("app id {} not found", app_id),
            })),
        )
            .into_response();
    };

    let url = format!("{}/{}", base, method_path.trim_start_matches('/'));
    let mut request = state.client.request(method, &url).body(body);
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        request = request.header(header::CONTENT_TYPE, content_type.clone());
    }

    match request.send().await {
        Ok(upstream) => {
            let status = upstream.status();
            let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
            let bytes = upstream.bytes().await.unwrap_or_default();

            let mut response = (status, bytes).into_response();
            if let Some(content_type) = content_type {
                response
                    .headers_mut()
                    .insert(header::CONTENT_TYPE, content_type);
            }
            response
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Stub sidecar could not reach app");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "errorCode": "ERR_DIRECT_INVOKE",
                    "message": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// Start a stub sidecar routing app ids to base URLs; returns its base URL.
pub async fn spawn_sidecar(routes: HashMap<String, String>) -> Result<String> {
    let state = SidecarState {
        routes: Arc::new(routes),
        client: reqwest::Client::new(),
    };
    let router = Router::new()
        .route("/v1.0/invoke/:app_id/method/*method", any(invoke))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = format!("http://127.0.0.1:{}", listener.local_addr()?.port());

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    Ok(address)
}

/// Start the payments service on a random port; returns its base URL.
pub async fn spawn_payments() -> Result<String> {
    let config = payments_service::config::PaymentsConfig {
        common: CoreConfig {
            port: 0,
            ..Default::default()
        },
    };
    let app = payments_service::Application::build(config)
        .await
        .map_err(|e| anyhow!("Failed to build payments-service: {}", e))?;
    let address = format!("http://127.0.0.1:{}", app.port());

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    Ok(address)
}

/// Start the orders service against `proxy_base_url`; returns its base URL.
pub async fn spawn_orders(proxy_base_url: &str, target_app_id: &str) -> Result<String> {
    let config = OrdersConfig {
        common: CoreConfig {
            port: 0,
            ..Default::default()
        },
        invocation: InvocationConfig {
            proxy_base_url: proxy_base_url.to_string(),
            target_app_id: target_app_id.to_string(),
            ..Default::default()
        },
        charge: ChargeConfig::default(),
    };
    let app = orders_service::Application::build(config)
        .await
        .map_err(|e| anyhow!("Failed to build orders-service: {}", e))?;
    let address = format!("http://127.0.0.1:{}", app.port());

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    Ok(address)
}

/// Context for workflow tests: both services wired through one sidecar.
pub struct WorkflowTestContext {
    pub orders: String,
    pub payments: String,
    pub sidecar: String,
    pub client: reqwest::Client,
}

impl WorkflowTestContext {
    /// Spawn payments, a sidecar that knows it as `payments`, and orders.
    pub async fn new() -> Result<Self> {
        Self::with_target("payments").await
    }

    /// Like [`WorkflowTestContext::new`] but orders targets `target_app_id`.
    pub async fn with_target(target_app_id: &str) -> Result<Self> {
        init_tracing();

        let payments = spawn_payments().await?;
        let sidecar = spawn_sidecar(HashMap::from([(
            "payments".to_string(),
            payments.clone(),
        )]))
        .await?;
        let orders = spawn_orders(&sidecar, target_app_id).await?;

        let ctx = Self {
            orders,
            payments,
            sidecar,
            client: reqwest::Client::new(),
        };
        ctx.wait_until_healthy(Duration::from_secs(5)).await?;

        Ok(ctx)
    }

    /// Poll both health endpoints until they answer 200 OK.
    pub async fn wait_until_healthy(&self, timeout: Duration) -> Result<()> {
        let health_urls = [
            ("orders", format!("{}/health", self.orders)),
            ("payments", format!("{}/health", self.payments)),
        ];
        let start = std::time::Instant::now();

        loop {
            let mut unhealthy_services = Vec::new();

            for (name, url) in &health_urls {
                match self.client.get(url).send().await {
                    Ok(resp) if resp.status().is_success() => {}
                    Ok(resp) => {
                        unhealthy_services.push(format!("{} (status: {})", name, resp.status()))
                    }
                    Err(e) => unhealthy_services.push(format!("{} (error: {})", name, e)),
                }
            }

            if unhealthy_services.is_empty() {
                return Ok(());
            }

            if start.elapsed() > timeout {
                return Err(anyhow!(
                    "Timeout waiting for services. Unhealthy: {}",
                    unhealthy_services.join(", ")
                ));
            }

            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    pub fn charge_url(&self, order_id: &str) -> String {
        format!("{}/orders/{}/charge", self.orders, order_id)
    }
}
