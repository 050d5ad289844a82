//! Token storage in the system keyring
use keyring::Entry;
use t3tracker_core::CredentialStore;
use t3tracker_domain::{Result, TrackerError};

use crate::errors::InfraError;

/// [`CredentialStore`] backed by the OS keychain
#[derive(Debug, Clone)]
pub struct KeychainCredentialStore {
    service: String,
    account: String,
}

impl KeychainCredentialStore {
    pub fn new(service: &str, account: &str) -> Self {
        Self { service: service.to_string(), account: account.to_string() }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, &self.account)
            .map_err(|e| TrackerError::Storage(format!("Failed to access keyring: {e}")))
    }
}

impl CredentialStore for KeychainCredentialStore {
    fn get_token(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }

    fn save_token(&self, token: &str) -> Result<()> {
        self.entry()?.set_password(token).map_err(|err| InfraError::from(err).into())
    }

    fn clear_token(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}
