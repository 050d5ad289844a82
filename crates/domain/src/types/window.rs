//! Tracked-time types
//!
//! A [`TimeWindow`] is the unit submitted to the backend. Its JSON shape is
//! fixed by the backend contract: camelCase ids and offsets, with the host
//! snapshot fields flattened into the same object.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};
use crate::impl_domain_enum_conversions;

/// Host identity captured when a window is packaged.
///
/// Any field the platform cannot report is `None` and serialized as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSnapshot {
    pub computer: Option<String>,
    pub user: Option<String>,
    pub domain: Option<String>,
    pub os: Option<String>,
    pub os_version: Option<String>,
    /// Hex-encoded hardware identifier derived from a network interface.
    pub hwid: Option<String>,
}

/// One packaged, contiguous slice of tracked time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    /// Chunk start, ms since the Unix epoch.
    pub start: i64,
    /// Chunk end, ms since the Unix epoch.
    pub end: i64,
    /// Local-to-UTC offset in ms, positive west of UTC.
    pub timezone_offset: i64,
    pub project_id: String,
    pub task_id: String,
    #[serde(flatten)]
    pub system: SystemSnapshot,
}

impl TimeWindow {
    pub fn duration_ms(&self) -> i64 {
        self.end - self.start
    }
}

/// Project/task pair a session tracks time against.
///
/// Both ids are validated non-blank on construction, so holding a
/// `Selection` means tracking may start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    project_id: String,
    task_id: String,
}

impl Selection {
    /// Validate a project/task pair.
    ///
    /// # Errors
    /// Returns `TrackerError::InvalidSelection` when either id is empty or
    /// whitespace.
    pub fn new(project_id: impl Into<String>, task_id: impl Into<String>) -> Result<Self> {
        let project_id = project_id.into();
        let task_id = task_id.into();

        if project_id.trim().is_empty() {
            return Err(TrackerError::InvalidSelection("project id is empty".into()));
        }
        if task_id.trim().is_empty() {
            return Err(TrackerError::InvalidSelection("task id is empty".into()));
        }

        Ok(Self { project_id, task_id })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }
}

/// Lifecycle phase of a tracking session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Running,
    Stopped,
}

impl_domain_enum_conversions!(SessionPhase {
    Idle => "idle",
    Running => "running",
    Stopped => "stopped",
});

/// What a session produced between start and stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub elapsed_seconds: u64,
    pub windows_emitted: u64,
}
