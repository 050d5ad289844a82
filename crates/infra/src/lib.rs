//! # T3 Tracker Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with retry and the backend API adapters
//! - Credential stores (TOML file, OS keychain, memory)
//! - Configuration loading
//! - Host identity via `sysinfo`
//!
//! ## Architecture
//! - Implements traits defined in `t3tracker-core`
//! - Contains all "impure" code (I/O, network, platform APIs)

pub mod api;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod http;
pub mod platform;

// Re-export commonly used items
pub use api::{ApiAuthService, ApiClient, ApiClientConfig, ApiCommands, ApiError, ApiErrorCategory};
pub use credentials::{FileCredentialStore, KeychainCredentialStore, MemoryCredentialStore};
pub use errors::InfraError;
pub use http::HttpClient;
pub use platform::HostSystemInfo;
