//! Password login against the backend
//!
//! `login` posts the credentials as a form and keeps the returned bearer
//! token in the [`ApiClient`], which persists it to the credential store.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use t3tracker_core::AuthGateway;
use t3tracker_domain::constants::{ROUTE_CURRENT_USER, ROUTE_LOGIN};
use t3tracker_domain::{Result, TrackerError, UserRecord};
use tracing::{debug, info, instrument, warn};

use super::client::ApiClient;
use super::errors::ApiError;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// [`AuthGateway`] backed by the REST API
pub struct ApiAuthService {
    client: Arc<ApiClient>,
}

impl ApiAuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Check if a bearer token is held
    pub fn is_authenticated(&self) -> bool {
        self.client.has_token()
    }
}

#[async_trait]
impl AuthGateway for ApiAuthService {
    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<Option<UserRecord>> {
        if !self.client.has_token() {
            debug!("No token held; signed out");
            return Ok(None);
        }

        match self.client.get::<UserRecord>(ROUTE_CURRENT_USER, &[]).await {
            Ok(user) => Ok(Some(user)),
            Err(ApiError::Auth(message)) => {
                warn!(error = %message, "Stored token rejected");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<()> {
        info!("Starting API authentication");

        let response: LoginResponse = self
            .client
            .post_form(ROUTE_LOGIN, &[("username", email), ("password", password)])
            .await
            .map_err(|err| match err {
                ApiError::Auth(message) | ApiError::Client(message) => {
                    TrackerError::Auth(format!("Login failed: {message}"))
                }
                other => other.into(),
            })?;

        let token = response
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| TrackerError::Auth("Login response did not include an access token".into()))?;

        self.client.set_token(Some(&token)).map_err(TrackerError::from)?;
        info!("API authentication successful");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<()> {
        self.client.set_token(None).map_err(TrackerError::from)?;
        info!("Token cleared");
        Ok(())
    }
}
