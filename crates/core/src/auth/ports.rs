//! Port interfaces for authentication and credential persistence

use async_trait::async_trait;
use t3tracker_domain::{Result, UserRecord};

/// Sign-in against the tracking backend
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// The user behind the held token, or `None` when signed out.
    async fn current_user(&self) -> Result<Option<UserRecord>>;

    /// Exchange credentials for a bearer token and persist it.
    async fn login(&self, email: &str, password: &str) -> Result<()>;

    /// Drop the held token and clear it from storage.
    async fn logout(&self) -> Result<()>;
}

/// Durable storage for at most one bearer token
pub trait CredentialStore: Send + Sync {
    fn get_token(&self) -> Result<Option<String>>;

    fn save_token(&self, token: &str) -> Result<()>;

    /// Remove the token. Clearing an empty store succeeds.
    fn clear_token(&self) -> Result<()>;
}
