//! Process-local token store
use parking_lot::Mutex;
use t3tracker_core::CredentialStore;
use t3tracker_domain::Result;

/// [`CredentialStore`] that forgets the token when the process exits
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new(token: Option<String>) -> Self {
        Self { token: Mutex::new(token) }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get_token(&self) -> Result<Option<String>> {
        Ok(self.token.lock().clone())
    }

    fn save_token(&self, token: &str) -> Result<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        *self.token.lock() = None;
        Ok(())
    }
}
