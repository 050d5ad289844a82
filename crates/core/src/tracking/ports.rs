//! Port interfaces for time tracking
//!
//! These traits define the boundaries between the tracking loop and the
//! platform, the backend and the display.

use async_trait::async_trait;
use t3tracker_domain::{Result, SystemSnapshot, TimeWindow};

/// Wall-clock source for window timestamps
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Reports host identity and the local UTC offset.
///
/// Implementations never fail: a field that cannot be determined is
/// reported as absent.
pub trait SystemInfoProvider: Send + Sync {
    /// Capture the current host identity.
    fn snapshot(&self) -> SystemSnapshot;

    /// Local-to-UTC offset in milliseconds, positive west of UTC.
    fn timezone_offset_millis(&self) -> i64;
}

/// Accepts completed windows for delivery to the backend
#[async_trait]
pub trait TimeWindowSender: Send + Sync {
    /// Submit one window. Called at most once per window; no retry.
    async fn submit_time_window(&self, window: &TimeWindow) -> Result<()>;
}

/// Receives elapsed-time updates for presentation
pub trait ElapsedDisplay: Send + Sync {
    fn show_elapsed(&self, elapsed_seconds: u64);
}
