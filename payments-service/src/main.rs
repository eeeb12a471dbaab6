use payments_service::{config::PaymentsConfig, Application};
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PaymentsConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("payments", &config.common.log_level);

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
