use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentsConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
}

impl PaymentsConfig {
    pub fn load() -> Result<Self, AppError> {
        Ok(PaymentsConfig {
            common: core_config::Config::load()?,
        })
    }
}
