use orders_service::config::{ChargeConfig, InvocationConfig, OrdersConfig};
use orders_service::Application;
use service_core::config::Config as CoreConfig;

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

/// Config pointing at `proxy_base_url` with a random listen port.
pub fn test_config(proxy_base_url: &str) -> OrdersConfig {
    OrdersConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            ..Default::default()
        },
        invocation: InvocationConfig {
            proxy_base_url: proxy_base_url.to_string(),
            ..Default::default()
        },
        charge: ChargeConfig::default(),
    }
}

impl TestApp {
    pub async fn spawn(config: OrdersConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }

    pub fn charge_url(&self, order_id: &str) -> String {
        format!("{}/orders/{}/charge", self.address, order_id)
    }
}
