//! Domain types and models

pub mod directory;
pub mod window;

pub use directory::{
    Project, TaskDetail, TaskListing, TaskOption, TaskSummary, TaskTimeTotal, UserRecord,
};
pub use window::{Selection, SessionPhase, SessionSummary, SystemSnapshot, TimeWindow};
