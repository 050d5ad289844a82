//! Backend API adapters
//!
//! - [`ApiClient`]: base URL, bearer token and status mapping over
//!   [`crate::http::HttpClient`]
//! - [`ApiAuthService`]: password login and `/auth/me`
//! - [`ApiCommands`]: project/task directory and time-window submission
//!
//! Reads are retried on transient failures. Writes (login, time windows)
//! are sent once.

pub mod auth;
pub mod client;
pub mod commands;
pub mod errors;

pub use auth::ApiAuthService;
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use commands::ApiCommands;
pub use errors::{ApiError, ApiErrorCategory};
