use std::time::Duration;

use t3tracker_domain::{LogFormat, LoggingConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Env vars consulted for the log filter, in order.
const FILTER_ENV_VARS: [&str; 2] = ["T3TRACKER_LOG", "RUST_LOG"];

/// Install the global subscriber.
///
/// The filter comes from `T3TRACKER_LOG`, then `RUST_LOG`, then
/// `config.level`. Logs go to stderr so command output on stdout stays
/// clean. Calling this twice keeps the first subscriber.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = FILTER_ENV_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|value| !value.trim().is_empty()))
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.with_target(false).try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// `error_type` is `None` on success, otherwise a stable label such as
/// [`TrackerError::label`](t3tracker_domain::TrackerError::label). Callers
/// must not pass credentials in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error_type: Option<&str>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error_type {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(error_type) => {
            warn!(command, duration_ms, error_type, "command_execution_failure");
        }
    }
}
