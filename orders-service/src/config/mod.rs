use serde::Deserialize;
use service_core::config::{self as core_config, env_or, parse_env};
use service_core::error::AppError;
use std::time::Duration;

pub const DEFAULT_PROXY_BASE_URL: &str = "http://localhost:3500";
pub const DEFAULT_TARGET_APP_ID: &str = "payments";
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;
pub const DEFAULT_CHARGE_AMOUNT: f64 = 10.0;

#[derive(Debug, Clone, Deserialize)]
pub struct OrdersConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub invocation: InvocationConfig,
    pub charge: ChargeConfig,
}

/// Where and how the sidecar proxy is called.
#[derive(Debug, Clone, Deserialize)]
pub struct InvocationConfig {
    /// Sidecar base URL, e.g. `http://localhost:3500`.
    pub proxy_base_url: String,
    /// Logical app id the sidecar resolves to the payments service.
    pub target_app_id: String,
    pub timeout_secs: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChargeConfig {
    /// Amount used when the caller omits `?amount=`.
    pub default_amount: f64,
}

impl InvocationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            proxy_base_url: DEFAULT_PROXY_BASE_URL.to_string(),
            target_app_id: DEFAULT_TARGET_APP_ID.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            default_amount: DEFAULT_CHARGE_AMOUNT,
        }
    }
}

impl OrdersConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;

        let config = OrdersConfig {
            common,
            invocation: InvocationConfig {
                proxy_base_url: env_or("DAPR_HTTP", DEFAULT_PROXY_BASE_URL),
                target_app_id: env_or("TARGET_APP_ID", DEFAULT_TARGET_APP_ID),
                timeout_secs: parse_env("INVOKE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            },
            charge: ChargeConfig {
                default_amount: parse_env("CHARGE_DEFAULT_AMOUNT", DEFAULT_CHARGE_AMOUNT)?,
            },
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let timeout = self.invocation.timeout_secs;
        if !timeout.is_finite() || timeout <= 0.0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "INVOKE_TIMEOUT_SECS must be a positive number of seconds, got {}",
                timeout
            )));
        }
        if !self.charge.default_amount.is_finite() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "CHARGE_DEFAULT_AMOUNT must be finite, got {}",
                self.charge.default_amount
            )));
        }
        if self.invocation.target_app_id.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "TARGET_APP_ID must not be empty"
            )));
        }
        Ok(())
    }
}
