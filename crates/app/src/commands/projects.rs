//! Project and task commands

use std::time::Instant;

use t3tracker_core::SessionHost;
use t3tracker_domain::{Project, Result, TaskListing, TaskTimeTotal, TrackerError};
use tracing::info;

use crate::context::AppContext;
use crate::utils::log_command_execution;

/// Get the projects assigned to the signed-in user
pub async fn list_projects(ctx: &AppContext) -> Result<Vec<Project>> {
    let command_name = "projects::list_projects";
    let start = Instant::now();

    info!(command = command_name, "Fetching user projects");

    let result = fetch_projects(ctx).await;
    let error_type = result.as_ref().err().map(TrackerError::label);
    log_command_execution(command_name, start.elapsed(), error_type);

    result
}

/// Get a project's tasks, split into the user's own and the others
pub async fn list_tasks(ctx: &AppContext, project_id: &str) -> Result<TaskListing> {
    let command_name = "projects::list_tasks";
    let start = Instant::now();

    info!(command = command_name, project_id, "Fetching project tasks");

    let result = fetch_tasks(ctx, project_id).await;
    let error_type = result.as_ref().err().map(TrackerError::label);
    log_command_execution(command_name, start.elapsed(), error_type);

    result
}

/// Get the time the user has booked on one of their tasks
pub async fn task_total(
    ctx: &AppContext,
    project_id: &str,
    task_id: &str,
) -> Result<TaskTimeTotal> {
    let command_name = "projects::task_total";
    let start = Instant::now();

    let result = fetch_task_total(ctx, project_id, task_id).await;
    let error_type = result.as_ref().err().map(TrackerError::label);
    log_command_execution(command_name, start.elapsed(), error_type);

    result
}

/// Resume the stored session unless a user is already signed in.
///
/// # Errors
/// `TrackerError::Auth` when no stored token resolves to a user.
pub(crate) async fn ensure_signed_in(host: &mut SessionHost) -> Result<()> {
    if host.user().is_some() {
        return Ok(());
    }
    match host.resume().await? {
        Some(_) => Ok(()),
        None => Err(TrackerError::Auth("not signed in; run `t3tracker login` first".into())),
    }
}

async fn fetch_projects(ctx: &AppContext) -> Result<Vec<Project>> {
    let mut host = ctx.host.lock().await;
    ensure_signed_in(&mut host).await?;
    host.load_projects().await.map(<[Project]>::to_vec)
}

async fn fetch_tasks(ctx: &AppContext, project_id: &str) -> Result<TaskListing> {
    let mut host = ctx.host.lock().await;
    ensure_signed_in(&mut host).await?;
    host.select_project(Some(project_id)).await.cloned()
}

async fn fetch_task_total(
    ctx: &AppContext,
    project_id: &str,
    task_id: &str,
) -> Result<TaskTimeTotal> {
    let mut host = ctx.host.lock().await;
    ensure_signed_in(&mut host).await?;
    host.select_project(Some(project_id)).await?;
    host.select_task(Some(task_id))?;

    host.selected_task_total().await.ok_or_else(|| {
        TrackerError::InvalidSelection(format!("task {task_id} is not assigned to you"))
    })
}
