//! Application constants
//!
//! Centralized location for domain-level constants.

/// Interval between two ticks of a tracking session.
pub const TICK_INTERVAL_MS: u64 = 1_000;

/// Number of ticks accumulated before a cadence flush.
pub const FLUSH_EVERY_TICKS: u64 = 60;

/// Default base URL of the tracking backend.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Credential file section and key holding the bearer token.
pub const CREDENTIALS_SECTION: &str = "auth";
pub const CREDENTIALS_TOKEN_KEY: &str = "token";
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.toml";

pub const KEYCHAIN_SERVICE: &str = "com.t3tracker.app";
pub const KEYCHAIN_ACCOUNT: &str = "api_token";

// Backend routes (relative to the base URL)
pub const ROUTE_LOGIN: &str = "/auth/login";
pub const ROUTE_CURRENT_USER: &str = "/auth/me";
pub const ROUTE_PROJECT: &str = "/v1/project";
pub const ROUTE_TASK: &str = "/v1/task";
pub const ROUTE_TASK_TIME: &str = "/v1/analytics/task-time";
pub const ROUTE_TIME_ENTRIES: &str = "/v1/time-entries";
