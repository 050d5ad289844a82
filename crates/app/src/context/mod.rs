//! Application context - dependency injection container

use std::sync::Arc;

use t3tracker_core::{
    Clock, CredentialStore, ElapsedDisplay, HostPorts, SessionHost, SystemClock, TrackingReport,
};
use t3tracker_domain::{Config, Result, TrackerError};
use t3tracker_infra::{
    credentials, ApiAuthService, ApiClient, ApiClientConfig, ApiCommands, HostSystemInfo,
};
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::utils::TerminalDisplay;

/// Application context holding all services
pub struct AppContext {
    pub config: Config,
    pub api_client: Arc<ApiClient>,
    pub auth: Arc<ApiAuthService>,
    pub api_commands: Arc<ApiCommands>,
    /// Wall clock used for window timestamps
    pub clock: Arc<dyn Clock>,
    pub host: Mutex<SessionHost>,
}

impl AppContext {
    /// Wire the context from configuration, rendering the timer on stdout.
    ///
    /// # Errors
    /// Returns `TrackerError::Config` if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let credentials = credentials::from_config(&config.credentials);
        Self::with_ports(config, credentials, Arc::new(TerminalDisplay::stdout()))
    }

    /// Wire the context with an explicit credential store and display.
    ///
    /// # Errors
    /// Returns `TrackerError::Config` if the HTTP client cannot be built.
    #[instrument(skip_all, fields(base_url = %config.api.base_url))]
    pub fn with_ports(
        config: Config,
        credentials: Arc<dyn CredentialStore>,
        display: Arc<dyn ElapsedDisplay>,
    ) -> Result<Self> {
        let api_client = Arc::new(
            ApiClient::new(ApiClientConfig::from(&config.api), credentials)
                .map_err(TrackerError::from)?,
        );
        let auth = Arc::new(ApiAuthService::new(Arc::clone(&api_client)));
        let api_commands = Arc::new(ApiCommands::new(Arc::clone(&api_client)));

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let ports = HostPorts {
            auth: auth.clone(),
            directory: api_commands.clone(),
            sender: api_commands.clone(),
            display,
            clock: Arc::clone(&clock),
            system_info: Arc::new(HostSystemInfo::new()),
        };
        let host = SessionHost::new(ports, config.tracking);

        info!(signed_in = api_client.has_token(), "Application context ready");
        Ok(Self { config, api_client, auth, api_commands, clock, host: Mutex::new(host) })
    }

    /// Stop any running session, flushing its last window.
    pub async fn shutdown(&self) -> Option<TrackingReport> {
        let report = self.host.lock().await.shutdown().await;
        info!(flushed = report.is_some(), "Application context shut down");
        report
    }
}
