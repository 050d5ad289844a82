//! API client for the tracking backend
//!
//! Wraps [`HttpClient`] with the backend base URL, bearer authentication and
//! status mapping. The bearer token is loaded from the credential store at
//! construction and written back whenever it changes.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use t3tracker_core::CredentialStore;
use t3tracker_domain::constants::DEFAULT_API_BASE_URL;
use t3tracker_domain::{ApiConfig, TrackerError};
use tracing::{debug, info, instrument, warn};

use super::errors::ApiError;
use crate::http::{HttpClient, RetryPolicy};

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "http://127.0.0.1:8000/api")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
    /// Attempts for idempotent reads; writes are always sent once
    pub max_attempts: usize,
    pub user_agent: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            user_agent: None,
        }
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            ..Self::default()
        }
    }
}

/// Authenticated client for the backend REST API
pub struct ApiClient {
    http_client: HttpClient,
    config: ApiClientConfig,
    credentials: Arc<dyn CredentialStore>,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a new API client and load any stored token.
    ///
    /// A credential store that cannot be read is logged and treated as
    /// holding no token.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created
    pub fn new(
        config: ApiClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        let token = match credentials.get_token() {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(err) => {
                warn!(error = %err, "Failed to read stored token; starting signed out");
                None
            }
        };
        debug!(has_token = token.is_some(), "API client initialised");

        Ok(Self {
            http_client,
            config: ApiClientConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            credentials,
            token: RwLock::new(token),
        })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    /// Replace the bearer token and persist the change.
    ///
    /// `None` clears both the in-memory token and the store.
    ///
    /// # Errors
    ///
    /// Returns error if the credential store cannot be written. The
    /// in-memory token is updated regardless.
    pub fn set_token(&self, token: Option<&str>) -> Result<(), ApiError> {
        let token = token.filter(|t| !t.is_empty()).map(str::to_string);
        *self.token.write() = token.clone();

        let persisted = match token {
            Some(token) => self.credentials.save_token(&token),
            None => self.credentials.clear_token(),
        };
        persisted.map_err(|e| ApiError::Config(format!("Failed to persist token: {e}")))
    }

    /// Execute an authenticated GET request
    ///
    /// # Errors
    ///
    /// Returns error if no token is held, the request fails or the response
    /// cannot be deserialized
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET request");

        let request = self.authorized(self.http_client.request(Method::GET, &url))?.query(query);
        let response = self.execute(request, RetryPolicy::Idempotent).await?;
        let result = Self::read_json(response, &url).await?;

        debug!(path = %path, "GET request successful");
        Ok(result)
    }

    /// Execute an authenticated JSON POST exactly once
    ///
    /// Any response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns error if no token is held, the request fails or the backend
    /// answers with a non-success status
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.url(path);
        debug!(url = %url, "POST request");

        let request = self.authorized(self.http_client.request(Method::POST, &url))?.json(body);
        let response = self.execute(request, RetryPolicy::Once).await?;
        Self::ensure_success(response, &url).await?;

        info!(path = %path, "POST request successful");
        Ok(())
    }

    /// Execute an unauthenticated form POST exactly once
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self, form), fields(path = %path))]
    pub async fn post_form<R: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "POST form request");

        let request = self.http_client.request(Method::POST, &url).form(form);
        let response = self.execute(request, RetryPolicy::Once).await?;
        Self::read_json(response, &url).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.token.read().clone().ok_or_else(|| ApiError::Auth("not signed in".into()))?;
        Ok(request.bearer_auth(token))
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        policy: RetryPolicy,
    ) -> Result<Response, ApiError> {
        let timeout = self.config.timeout;

        match tokio::time::timeout(timeout, self.http_client.send(request, policy)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(Self::map_tracker_error(err)),
            Err(_) => Err(ApiError::Timeout(timeout)),
        }
    }

    async fn ensure_success(response: Response, url: &str) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Self::map_status_error(status, url, &body))
    }

    async fn read_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, ApiError> {
        let response = Self::ensure_success(response, url).await?;
        let status = response.status();

        // 204/205 carry no body
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Client(format!(
                    "No content response ({}), but response type cannot be deserialized from empty body",
                    status.as_u16()
                ))
            });
        }

        response.json().await.map_err(|e| ApiError::Client(format!("Failed to parse response: {e}")))
    }

    fn map_status_error(status: StatusCode, url: &str, body: &str) -> ApiError {
        let message = if body.is_empty() {
            format!("{url} returned status {status}")
        } else {
            format!("{url} returned status {status}: {body}")
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ApiError::Auth(message)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            ApiError::RateLimit(message)
        } else if status == StatusCode::NOT_FOUND {
            ApiError::NotFound(message)
        } else if status.is_server_error() {
            ApiError::Server(message)
        } else if status.is_client_error() {
            ApiError::Client(message)
        } else {
            ApiError::Network(message)
        }
    }

    fn map_tracker_error(err: TrackerError) -> ApiError {
        ApiError::from(err)
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    credentials: Option<Arc<dyn CredentialStore>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the store the bearer token is persisted in
    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the credential store is missing or client creation
    /// fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let credentials = self
            .credentials
            .ok_or_else(|| ApiError::Config("Credential store not set".to_string()))?;

        ApiClient::new(config, credentials)
    }
}
