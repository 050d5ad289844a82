//! Commands - CLI to backend bridge

mod auth;
mod projects;
mod tracking;

pub use auth::*;
pub use projects::*;
pub use tracking::*;
