//! API-specific error types
//!
//! Classifies backend failures so callers can log a stable category and map
//! them onto the domain error.

use std::time::Duration;

use t3tracker_domain::TrackerError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403) or a missing token
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth)
    Client,
    /// Network/connection errors and timeouts
    Network,
    /// Configuration errors
    Config,
}

impl ApiErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::RateLimit => "rate_limit",
            Self::Server => "server",
            Self::Client => "client",
            Self::Network => "network",
            Self::Config => "config",
        }
    }
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::NotFound(_) | Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::Network(message) => Self::Network(message),
            TrackerError::Auth(message) => Self::Auth(message),
            TrackerError::Config(message) => Self::Config(message),
            TrackerError::NotFound(message) => Self::NotFound(message),
            TrackerError::InvalidInput(message) | TrackerError::InvalidSelection(message) => {
                Self::Client(message)
            }
            other => Self::Server(other.to_string()),
        }
    }
}

impl From<ApiError> for TrackerError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => Self::Auth(message),
            ApiError::NotFound(message) => Self::NotFound(message),
            ApiError::Client(message) => Self::InvalidInput(message),
            ApiError::Config(message) => Self::Config(message),
            ApiError::RateLimit(_) | ApiError::Server(_) | ApiError::Network(_) => {
                Self::Network(err.to_string())
            }
            ApiError::Timeout(_) => Self::Network(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(ApiError::Auth("test".to_string()).category(), ApiErrorCategory::Authentication);
        assert_eq!(ApiError::RateLimit("test".to_string()).category(), ApiErrorCategory::RateLimit);
        assert_eq!(ApiError::Server("test".to_string()).category(), ApiErrorCategory::Server);
        assert_eq!(ApiError::NotFound("test".to_string()).category(), ApiErrorCategory::Client);
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(30)).category(),
            ApiErrorCategory::Network
        );
    }

    #[test]
    fn test_domain_mapping() {
        let err: TrackerError = ApiError::Auth("expired".into()).into();
        assert_eq!(err, TrackerError::Auth("expired".into()));

        let err: TrackerError = ApiError::Server("boom".into()).into();
        assert!(matches!(err, TrackerError::Network(msg) if msg.contains("boom")));

        let err: TrackerError = ApiError::NotFound("task t9".into()).into();
        assert!(matches!(err, TrackerError::NotFound(_)));
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ApiErrorCategory::RateLimit.as_str(), "rate_limit");
        assert_eq!(ApiErrorCategory::Authentication.as_str(), "authentication");
    }
}
