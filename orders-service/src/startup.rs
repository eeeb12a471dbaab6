//! Application startup and lifecycle management.

use crate::config::OrdersConfig;
use crate::handlers;
use crate::services::{metrics::describe_metrics, SidecarInvoker};
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::observability::init_metrics;
use service_core::server::{instrument, metrics_endpoint, shutdown_signal};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: OrdersConfig,
    pub invoker: SidecarInvoker,
}

impl AppState {
    pub fn new(config: OrdersConfig) -> Result<Self, AppError> {
        let invoker = SidecarInvoker::new(&config.invocation)?;
        Ok(Self { config, invoker })
    }
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(metrics_endpoint))
        .route("/orders/:order_id/charge", post(handlers::charge_order))
        .with_state(state);

    instrument(router)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Port 0 binds a random port, which tests rely on.
    pub async fn build(config: OrdersConfig) -> Result<Self, AppError> {
        init_metrics();
        describe_metrics();

        let state = AppState::new(config.clone())?;
        tracing::info!(
            target_url = %state.invoker.method_url(handlers::charge::CHARGE_METHOD),
            timeout_secs = config.invocation.timeout_secs,
            "Sidecar invocation configured"
        );

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Orders service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
