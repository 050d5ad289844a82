//! # T3 Tracker Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the backend, credential storage,
//!   the host platform and the display
//! - The tracking session: a cancellable once-per-second tick loop that
//!   packages contiguous time windows
//! - The session host that drives sign-in, selection and tracking
//!
//! ## Architecture Principles
//! - Only depends on `t3tracker-domain`
//! - No HTTP, file or platform code
//! - All external dependencies via traits

pub mod auth;
pub mod directory;
pub mod host;
pub mod tracking;

pub use auth::{AuthGateway, CredentialStore};
pub use directory::ProjectDirectory;
pub use host::{DeliveryReport, HostPorts, SessionHost, TrackingReport};
pub use tracking::{
    package_window, Clock, ElapsedDisplay, RuntimeClock, SessionEvents, SystemClock,
    SystemInfoProvider, TimeWindowSender, TrackingSession,
};
