//! Authentication ports

pub mod ports;

pub use ports::{AuthGateway, CredentialStore};
