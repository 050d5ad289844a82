//! Bearer token persistence
//!
//! Three [`CredentialStore`](t3tracker_core::CredentialStore) adapters:
//! a TOML file (default), the OS keychain and an in-memory store.

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

pub use file::FileCredentialStore;
pub use keychain::KeychainCredentialStore;
pub use memory::MemoryCredentialStore;
use t3tracker_core::CredentialStore;
use t3tracker_domain::{CredentialBackend, CredentialsConfig};

/// Build the store selected by configuration.
pub fn from_config(config: &CredentialsConfig) -> Arc<dyn CredentialStore> {
    match config.backend {
        CredentialBackend::File => Arc::new(FileCredentialStore::new(&config.path)),
        CredentialBackend::Keychain => Arc::new(KeychainCredentialStore::new(
            &config.keychain_service,
            &config.keychain_account,
        )),
    }
}
