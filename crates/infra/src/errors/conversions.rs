//! Conversions from external infrastructure errors into domain errors.

use keyring::Error as KeyringError;
use reqwest::Error as HttpError;
use t3tracker_domain::TrackerError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TrackerError);

impl From<InfraError> for TrackerError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TrackerError> for InfraError {
    fn from(value: TrackerError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTrackerError {
    fn into_tracker(self) -> TrackerError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → TrackerError */
/* -------------------------------------------------------------------------- */

impl IntoTrackerError for KeyringError {
    fn into_tracker(self) -> TrackerError {
        use KeyringError::{
            Ambiguous, BadEncoding, Invalid, NoEntry, NoStorageAccess, PlatformFailure, TooLong,
        };

        let description = self.to_string();

        match self {
            NoEntry => TrackerError::NotFound("keychain entry not found".into()),
            BadEncoding(_) => {
                TrackerError::Storage("credential in keychain is not valid UTF-8".into())
            }
            TooLong(name, limit) => TrackerError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            Invalid(attr, reason) => {
                TrackerError::Storage(format!("keychain attribute '{attr}' is invalid: {reason}"))
            }
            Ambiguous(entries) => TrackerError::Storage(format!(
                "multiple keychain entries matched request ({} results)",
                entries.len()
            )),
            PlatformFailure(err) => TrackerError::Storage(format!("keychain platform error: {err}")),
            NoStorageAccess(err) => {
                TrackerError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => TrackerError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_tracker())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TrackerError */
/* -------------------------------------------------------------------------- */

impl IntoTrackerError for HttpError {
    fn into_tracker(self) -> TrackerError {
        if self.is_timeout() {
            return TrackerError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return TrackerError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => TrackerError::Auth(message),
                404 => TrackerError::NotFound(message),
                400..=499 if code != 429 => TrackerError::InvalidInput(message),
                _ => TrackerError::Network(message),
            };
        }

        TrackerError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_tracker())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io / toml → TrackerError */
/* -------------------------------------------------------------------------- */

impl IntoTrackerError for std::io::Error {
    fn into_tracker(self) -> TrackerError {
        match self.kind() {
            std::io::ErrorKind::NotFound => TrackerError::NotFound(self.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                TrackerError::Storage(format!("permission denied: {self}"))
            }
            _ => TrackerError::Storage(self.to_string()),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_tracker())
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(TrackerError::Storage(format!("invalid TOML: {}", value.message())))
    }
}

impl From<toml::ser::Error> for InfraError {
    fn from(value: toml::ser::Error) -> Self {
        InfraError(TrackerError::Storage(format!("failed to encode TOML: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
