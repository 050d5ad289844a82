//! Time tracking commands

use std::future::Future;
use std::time::Instant;

use t3tracker_core::TrackingReport;
use t3tracker_domain::{Result, Selection, TrackerError};
use tracing::{info, instrument};

use super::projects::ensure_signed_in;
use crate::context::AppContext;
use crate::utils::log_command_execution;

/// Select a project and task, then start tracking.
///
/// The host lock is released once the session runs, so other commands
/// (and [`stop_tracking`]) can proceed while it ticks.
pub async fn start_tracking(ctx: &AppContext, project_id: &str, task_id: &str) -> Result<()> {
    let command_name = "tracking::start_tracking";
    let start = Instant::now();

    info!(command = command_name, project_id, task_id, "Starting tracking");

    let result = begin(ctx, project_id, task_id).await;
    let error_type = result.as_ref().err().map(TrackerError::label);
    log_command_execution(command_name, start.elapsed(), error_type);

    result
}

/// Stop the running session and wait for its windows to be delivered.
///
/// Returns `None` when nothing was running.
pub async fn stop_tracking(ctx: &AppContext) -> Option<TrackingReport> {
    let command_name = "tracking::stop_tracking";
    let start = Instant::now();

    let report = ctx.host.lock().await.stop_tracking().await;
    log_command_execution(command_name, start.elapsed(), None);

    report
}

/// Track until `stop` resolves, then stop and report.
///
/// # Errors
/// Any error from starting the session; once running, stopping always
/// produces a report.
#[instrument(skip(ctx, stop))]
pub async fn track_until<F>(
    ctx: &AppContext,
    project_id: &str,
    task_id: &str,
    stop: F,
) -> Result<TrackingReport>
where
    F: Future<Output = ()>,
{
    start_tracking(ctx, project_id, task_id).await?;
    stop.await;

    stop_tracking(ctx)
        .await
        .ok_or_else(|| TrackerError::SessionState("tracking session ended unexpectedly".into()))
}

async fn begin(ctx: &AppContext, project_id: &str, task_id: &str) -> Result<()> {
    Selection::new(project_id, task_id)?;

    let mut host = ctx.host.lock().await;
    ensure_signed_in(&mut host).await?;

    if host.is_tracking() {
        return Err(TrackerError::SessionState("a tracking session is already running".into()));
    }
    host.select_project(Some(project_id)).await?;
    host.select_task(Some(task_id))?;
    host.start_tracking()
}
