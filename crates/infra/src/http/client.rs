use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, Request, RequestBuilder, Response};
use t3tracker_domain::TrackerError;
use tracing::debug;

use crate::errors::InfraError;

/// How often a request may be put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Reads: retried on 5xx and transport failures with exponential backoff.
    Idempotent,
    /// Writes and credential posts: sent exactly once.
    Once,
}

/// Thin reqwest wrapper that applies a [`RetryPolicy`] per request.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

enum Outcome {
    Done(Result<Response, TrackerError>),
    Retry,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send a request under `policy`.
    ///
    /// A non-success status is returned as a response, not an error; only
    /// the last attempt's response or transport error is surfaced.
    ///
    /// # Errors
    /// `TrackerError::Network` (or a status-derived variant) for transport
    /// failures; `TrackerError::Internal` when a retried body is a stream.
    pub async fn send(
        &self,
        builder: RequestBuilder,
        policy: RetryPolicy,
    ) -> Result<Response, TrackerError> {
        let attempts = match policy {
            RetryPolicy::Idempotent => self.max_attempts,
            RetryPolicy::Once => 1,
        };

        let mut attempt = 1;
        loop {
            let request = Self::build_attempt(&builder)?;
            match self.attempt(request, attempt < attempts).await {
                Outcome::Done(result) => return result,
                Outcome::Retry => {
                    tokio::time::sleep(self.backoff_delay(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }

    fn build_attempt(builder: &RequestBuilder) -> Result<Request, TrackerError> {
        builder
            .try_clone()
            .ok_or_else(|| TrackerError::Internal("streaming request bodies cannot be resent".into()))?
            .build()
            .map_err(|err| InfraError::from(err).into())
    }

    async fn attempt(&self, request: Request, may_retry: bool) -> Outcome {
        let method = request.method().clone();
        let url = request.url().clone();

        match self.client.execute(request).await {
            Ok(response) if may_retry && response.status().is_server_error() => {
                debug!(%method, %url, status = %response.status(), "Server error, retrying");
                Outcome::Retry
            }
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "HTTP response");
                Outcome::Done(Ok(response))
            }
            Err(err) if may_retry && is_transient(&err) => {
                debug!(%method, %url, error = %err, "Transport failure, retrying");
                Outcome::Retry
            }
            Err(err) => Outcome::Done(Err(InfraError::from(err).into())),
        }
    }

    /// Backoff before retry `n` (1-based): `base * 2^(n-1)`, capped at 2^8.
    fn backoff_delay(&self, retry: usize) -> Duration {
        let exponent = u32::try_from(retry.saturating_sub(1).min(8)).unwrap_or(8);
        self.base_backoff.saturating_mul(1 << exponent)
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attempts for [`RetryPolicy::Idempotent`] requests, at least one.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// # Errors
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn build(self) -> Result<HttpClient, TrackerError> {
        let agent = self
            .user_agent
            .unwrap_or_else(|| concat!("t3tracker/", env!("CARGO_PKG_VERSION")).to_string());

        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(agent)
            .no_proxy()
            .build()
            .map_err(InfraError::from)?;

        Ok(HttpClient { client, max_attempts: self.max_attempts, base_backoff: self.base_backoff })
    }
}
