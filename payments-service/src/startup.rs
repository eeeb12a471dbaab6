use crate::config::PaymentsConfig;
use crate::handlers;
use crate::services::metrics::describe_metrics;
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::observability::init_metrics;
use service_core::server::{instrument, metrics_endpoint, shutdown_signal};
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub fn build_router() -> Router {
    instrument(
        Router::new()
            .route("/health", get(handlers::health_check))
            .route("/metrics", get(metrics_endpoint))
            .route("/charge", post(handlers::charge)),
    )
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: PaymentsConfig) -> Result<Self, AppError> {
        init_metrics();
        describe_metrics();

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Payments service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(),
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
