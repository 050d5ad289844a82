//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for T3 Tracker
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Tracking was requested without a project or task.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// A lifecycle call arrived in a state that does not allow it.
    #[error("Session state error: {0}")]
    SessionState(String),

    /// The backend did not accept a submitted time window.
    #[error("Delivery failure: {0}")]
    Delivery(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrackerError {
    /// Stable label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::Storage(_) => "storage",
            Self::Platform(_) => "platform",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidSelection(_) => "invalid_selection",
            Self::SessionState(_) => "session_state",
            Self::Delivery(_) => "delivery",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for T3 Tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
