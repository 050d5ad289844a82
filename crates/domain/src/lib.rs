//! # T3 Tracker Domain
//!
//! Business domain types and models for T3 Tracker.
//!
//! This crate contains:
//! - Tracked-time types (`TimeWindow`, `Selection`, `SystemSnapshot`)
//! - Backend records (users, projects, tasks)
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other T3 Tracker crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::format_elapsed;
