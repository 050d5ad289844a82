//! Sign-in commands

use std::time::Instant;

use t3tracker_core::TrackingReport;
use t3tracker_domain::{Result, TrackerError, UserRecord};
use tracing::info;

use crate::context::AppContext;
use crate::utils::log_command_execution;

/// Sign in and persist the bearer token.
pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<UserRecord> {
    let command_name = "auth::login";
    let start = Instant::now();

    info!(command = command_name, "Signing in");

    let result = ctx.host.lock().await.sign_in(email, password).await.cloned();
    let error_type = result.as_ref().err().map(TrackerError::label);
    log_command_execution(command_name, start.elapsed(), error_type);

    result
}

/// Sign out, stopping any running session first.
pub async fn logout(ctx: &AppContext) -> Result<Option<TrackingReport>> {
    let command_name = "auth::logout";
    let start = Instant::now();

    let result = ctx.host.lock().await.logout().await;
    let error_type = result.as_ref().err().map(TrackerError::label);
    log_command_execution(command_name, start.elapsed(), error_type);

    result
}

/// Resolve the user behind the stored token, if any.
pub async fn whoami(ctx: &AppContext) -> Result<Option<UserRecord>> {
    let command_name = "auth::whoami";
    let start = Instant::now();

    let result = ctx.host.lock().await.resume().await.map(|user| user.cloned());
    let error_type = result.as_ref().err().map(TrackerError::label);
    log_command_execution(command_name, start.elapsed(), error_type);

    result
}
