use common::auth::TokenConfig;
use common::telemetry::TelemetryConfig;
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    // Token configuration
    /// Shared secret used to sign API tokens
    #[serde(default = "default_token_secret")]
    pub token_secret: String,

    /// Token validity window in minutes
    #[serde(default = "default_token_timeout_minutes")]
    pub token_timeout_minutes: u64,

    /// Restrict group/asset results to wells on the new architecture
    #[serde(default)]
    pub new_architecture_enabled: bool,

    // Bootstrap credential seeded into the in-memory credential store
    #[serde(default = "default_bootstrap_admin_username")]
    pub bootstrap_admin_username: String,

    #[serde(default = "default_bootstrap_admin_password")]
    pub bootstrap_admin_password: String,

    // OpenTelemetry configuration
    #[serde(default)]
    pub otel_enabled: bool,

    #[serde(default = "default_otel_endpoint")]
    pub otel_endpoint: String,

    #[serde(default = "default_otel_service_name")]
    pub otel_service_name: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_token_secret() -> String {
    "change-me-in-production".to_string()
}

fn default_token_timeout_minutes() -> u64 {
    60
}

fn default_bootstrap_admin_username() -> String {
    "admin".to_string()
}

fn default_bootstrap_admin_password() -> String {
    "admin".to_string()
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_otel_service_name() -> String {
    "oilfield-all-in-one".to_string()
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("OILFIELD"))
            .build()?
            .try_deserialize()
    }

    pub fn token_config(&self) -> TokenConfig {
        TokenConfig::new(self.token_secret.clone(), self.token_timeout_minutes)
    }

    pub fn telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            service_name: self.otel_service_name.clone(),
            otel_endpoint: self.otel_endpoint.clone(),
            otel_enabled: self.otel_enabled,
            log_level: self.log_level.clone(),
        }
    }
}
