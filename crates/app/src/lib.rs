//! # T3 Tracker App
//!
//! Application layer - commands, wiring and the `t3tracker` CLI.
//!
//! This crate contains:
//! - Commands (CLI → backend bridge)
//! - Application context (dependency injection)
//! - Logging setup and the terminal timer display
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Provides commands for the CLI front end

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
