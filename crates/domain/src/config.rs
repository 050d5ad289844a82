//! Application configuration structures
//!
//! Every section has a default so a partial config file (or none at all)
//! still yields a usable configuration. Loading lives in the infra crate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS, DEFAULT_CREDENTIALS_FILE, FLUSH_EVERY_TICKS,
    KEYCHAIN_ACCOUNT, KEYCHAIN_SERVICE, TICK_INTERVAL_MS,
};
use crate::impl_domain_enum_conversions;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub tracking: TrackingConfig,
    pub credentials: CredentialsConfig,
    pub logging: LoggingConfig,
}

/// Remote tracking backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_API_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }
}

/// Tick cadence of tracking sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub tick_interval_ms: u64,
    pub flush_every_ticks: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self { tick_interval_ms: TICK_INTERVAL_MS, flush_every_ticks: FLUSH_EVERY_TICKS }
    }
}

impl TrackingConfig {
    /// Tick interval, never zero.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Where the bearer token is persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialBackend {
    #[default]
    File,
    Keychain,
}

impl_domain_enum_conversions!(CredentialBackend {
    File => "file",
    Keychain => "keychain",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub backend: CredentialBackend,
    /// Token file used by the `file` backend
    pub path: String,
    pub keychain_service: String,
    pub keychain_account: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            backend: CredentialBackend::File,
            path: DEFAULT_CREDENTIALS_FILE.to_string(),
            keychain_service: KEYCHAIN_SERVICE.to_string(),
            keychain_account: KEYCHAIN_ACCOUNT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl_domain_enum_conversions!(LogFormat {
    Text => "text",
    Json => "json",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Default filter directive when no env filter is set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: LogFormat::Text, level: "info".to_string() }
    }
}
