//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};

use crate::NodeError;

/// Configuration for the attest service.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`]
/// or built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Host the HTTP API binds to.
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Port the HTTP API binds to.
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Agent identity stamped on audit entries.
    #[serde(default = "default_agent_id")]
    pub agent_id: String,

    /// Whether paid jobs settle through the external payment service.
    /// When disabled, jobs auto-confirm (development mode).
    #[serde(default)]
    pub enable_payments: bool,

    /// Base URL of the payment service.
    #[serde(default = "default_payment_service_url")]
    pub payment_service_url: String,

    /// API key for the payment service.
    #[serde(default)]
    pub payment_api_key: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_api_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    8000
}

fn default_agent_id() -> String {
    "attest-agent-001".to_string()
}

fn default_payment_service_url() -> String {
    "http://localhost:3001/api/v1".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            api_port: default_api_port(),
            agent_id: default_agent_id(),
            enable_payments: false,
            payment_service_url: default_payment_service_url(),
            payment_api_key: String::new(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
