//! Session host - selection state and the active tracking session
//!
//! The host sits between a front end and the tracking loop. It signs the
//! user in, resolves the project/task selection, and owns at most one
//! running [`TrackingSession`]. While a session runs, two helper tasks drain
//! its channels: one forwards elapsed seconds to the display, the other
//! submits packaged windows to the backend, logging failed submissions and
//! moving on.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use t3tracker_domain::{
    Project, Result, SessionSummary, TaskListing, TaskOption, TaskTimeTotal, TimeWindow,
    TrackerError, TrackingConfig, UserRecord,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::auth::AuthGateway;
use crate::directory::ProjectDirectory;
use crate::tracking::{
    Clock, ElapsedDisplay, SessionEvents, SystemInfoProvider, TimeWindowSender, TrackingSession,
};

/// Collaborators the host is wired with.
#[derive(Clone)]
pub struct HostPorts {
    pub auth: Arc<dyn AuthGateway>,
    pub directory: Arc<dyn ProjectDirectory>,
    pub sender: Arc<dyn TimeWindowSender>,
    pub display: Arc<dyn ElapsedDisplay>,
    pub clock: Arc<dyn Clock>,
    pub system_info: Arc<dyn SystemInfoProvider>,
}

/// Outcome of submitting a session's windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub delivered: u64,
    pub failed: u64,
}

/// Everything known about a session once it has stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingReport {
    pub session: SessionSummary,
    pub delivery: DeliveryReport,
}

struct ActiveSession {
    session: TrackingSession,
    delivery: JoinHandle<DeliveryReport>,
    display: JoinHandle<()>,
}

/// Front-end facing controller for sign-in, selection and tracking.
pub struct SessionHost {
    ports: HostPorts,
    tracking: TrackingConfig,
    user: Option<UserRecord>,
    projects: Vec<Project>,
    selected_project: Option<String>,
    tasks: TaskListing,
    selected_task: Option<String>,
    active: Option<ActiveSession>,
}

impl SessionHost {
    pub fn new(ports: HostPorts, tracking: TrackingConfig) -> Self {
        Self {
            ports,
            tracking,
            user: None,
            projects: Vec::new(),
            selected_project: None,
            tasks: TaskListing::default(),
            selected_task: None,
            active: None,
        }
    }

    // === Sign-in ===

    /// Resolve the user behind a previously stored token.
    ///
    /// # Errors
    /// Propagates gateway errors other than a missing token.
    #[instrument(skip(self))]
    pub async fn resume(&mut self) -> Result<Option<&UserRecord>> {
        let user = self.ports.auth.current_user().await?;
        match &user {
            Some(user) => info!(user_id = %user.id, "Resumed stored session"),
            None => debug!("No stored session to resume"),
        }
        self.user = user;
        Ok(self.user.as_ref())
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    /// - `TrackerError::InvalidInput` if either credential is empty
    /// - `TrackerError::Auth` if the login succeeds but no user can be read
    /// - any gateway error from the login call
    #[instrument(skip(self, password))]
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<&UserRecord> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(TrackerError::InvalidInput("Email and password are required".into()));
        }

        self.ports.auth.login(email, password).await?;

        let user = self.ports.auth.current_user().await?.ok_or_else(|| {
            TrackerError::Auth("Login successful, but failed to fetch user data".into())
        })?;

        info!(user_id = %user.id, "Signed in");
        Ok(self.user.insert(user))
    }

    /// Stop any running session, then sign out.
    ///
    /// # Errors
    /// Propagates the gateway logout error; local state is cleared anyway.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<Option<TrackingReport>> {
        let report = self.stop_tracking().await;

        self.user = None;
        self.projects.clear();
        self.selected_project = None;
        self.tasks = TaskListing::default();
        self.selected_task = None;

        self.ports.auth.logout().await?;
        info!("Signed out");
        Ok(report)
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    // === Selection ===

    /// Fetch the projects assigned to the signed-in user.
    ///
    /// # Errors
    /// `TrackerError::Auth` when signed out, or the directory error.
    pub async fn load_projects(&mut self) -> Result<&[Project]> {
        self.require_user()?;
        self.projects = self.ports.directory.list_assigned_projects().await?;
        debug!(count = self.projects.len(), "Loaded projects");
        Ok(&self.projects)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Select a project (or clear the selection) and load its tasks.
    ///
    /// Tasks assigned to the user are listed under "mine" with the name from
    /// their detail record; the summary name is used when the detail call
    /// fails. The task selection is always cleared.
    ///
    /// # Errors
    /// - `TrackerError::SessionState` while a session is running
    /// - `TrackerError::Auth` when signed out
    /// - the directory error from the task listing
    #[instrument(skip(self))]
    pub async fn select_project(&mut self, project_id: Option<&str>) -> Result<&TaskListing> {
        self.ensure_selection_unlocked()?;
        let user_id = self.require_user()?.id.clone();

        self.selected_task = None;
        self.tasks = TaskListing::default();
        self.selected_project = None;

        let Some(project_id) = project_id.filter(|id| !id.trim().is_empty()) else {
            return Ok(&self.tasks);
        };

        let summaries = self.ports.directory.list_tasks_for_project(project_id).await?;
        let mut listing = TaskListing::default();

        for summary in summaries {
            if summary.is_assigned_to(&user_id) {
                let name = match self.ports.directory.task_detail(&summary.id).await {
                    Ok(detail) => detail.name,
                    Err(err) => {
                        warn!(task_id = %summary.id, error = %err, "Task detail unavailable, using summary name");
                        summary.name
                    }
                };
                listing.mine.push(TaskOption { id: summary.id, name });
            } else {
                listing.others.push(TaskOption { id: summary.id, name: summary.name });
            }
        }

        debug!(mine = listing.mine.len(), others = listing.others.len(), "Loaded tasks");
        self.selected_project = Some(project_id.to_string());
        self.tasks = listing;
        Ok(&self.tasks)
    }

    /// Select a task of the current project (or clear the selection).
    ///
    /// # Errors
    /// - `TrackerError::SessionState` while a session is running
    /// - `TrackerError::NotFound` if the task is not in the current listing
    pub fn select_task(&mut self, task_id: Option<&str>) -> Result<()> {
        self.ensure_selection_unlocked()?;

        match task_id {
            None => self.selected_task = None,
            Some(task_id) => {
                let known = self.tasks.mine.iter().chain(&self.tasks.others).any(|t| t.id == task_id);
                if !known {
                    return Err(TrackerError::NotFound(format!("task {task_id} is not listed")));
                }
                self.selected_task = Some(task_id.to_string());
            }
        }
        Ok(())
    }

    pub fn tasks(&self) -> &TaskListing {
        &self.tasks
    }

    pub fn selected_project(&self) -> Option<&str> {
        self.selected_project.as_deref()
    }

    pub fn selected_task(&self) -> Option<&str> {
        self.selected_task.as_deref()
    }

    /// True when no session runs and the selected task is assigned to the user.
    pub fn can_start(&self) -> bool {
        self.active.is_none()
            && self.selected_project.is_some()
            && self.selected_task.as_deref().is_some_and(|task| self.tasks.is_mine(task))
    }

    /// Total time the user has booked on the selected task.
    ///
    /// `None` when the selected task is not one of the user's. An unavailable
    /// total reads as zero.
    pub async fn selected_task_total(&self) -> Option<TaskTimeTotal> {
        let task_id = self.selected_task.as_deref().filter(|task| self.tasks.is_mine(task))?;
        let user = self.user.as_ref()?;

        match self.ports.directory.task_time_total(&user.id, task_id).await {
            Ok(total) => Some(total),
            Err(err) => {
                warn!(task_id, error = %err, "Failed to fetch task time total");
                Some(TaskTimeTotal::default())
            }
        }
    }

    // === Tracking ===

    /// Start tracking the selected project and task.
    ///
    /// # Errors
    /// - `TrackerError::SessionState` if a session is already running
    /// - `TrackerError::InvalidSelection` if no project/task is selected or
    ///   the task is not assigned to the user
    #[instrument(skip(self))]
    pub fn start_tracking(&mut self) -> Result<()> {
        if self.active.is_some() {
            return Err(TrackerError::SessionState("a tracking session is already running".into()));
        }

        let project_id = self.selected_project.clone().unwrap_or_default();
        let task_id = self.selected_task.clone().unwrap_or_default();

        if !task_id.is_empty() && !self.tasks.is_mine(&task_id) {
            return Err(TrackerError::InvalidSelection(format!(
                "task {task_id} is not assigned to the current user"
            )));
        }

        let mut session = TrackingSession::new(
            Arc::clone(&self.ports.clock),
            Arc::clone(&self.ports.system_info),
            self.tracking,
        );
        let SessionEvents { ticks, windows } = session.start(&project_id, &task_id)?;

        let delivery = tokio::spawn(forward_windows(windows, Arc::clone(&self.ports.sender)));
        let display = tokio::spawn(relay_ticks(ticks, Arc::clone(&self.ports.display)));

        self.active = Some(ActiveSession { session, delivery, display });
        Ok(())
    }

    /// Stop the running session, wait for its windows to be submitted and
    /// reset the display. Returns `None` when nothing was running.
    #[instrument(skip(self))]
    pub async fn stop_tracking(&mut self) -> Option<TrackingReport> {
        let ActiveSession { mut session, delivery, display } = self.active.take()?;

        let summary = session.stop().await.unwrap_or_default();

        // Both channels are closed once the tick task has exited.
        let delivery = delivery.await.unwrap_or_else(|err| {
            warn!(error = %err, "Window delivery task failed");
            DeliveryReport::default()
        });
        if let Err(err) = display.await {
            warn!(error = %err, "Display relay task failed");
        }
        self.ports.display.show_elapsed(0);

        let report = TrackingReport { session: summary, delivery };
        info!(
            elapsed_seconds = summary.elapsed_seconds,
            windows = summary.windows_emitted,
            delivered = delivery.delivered,
            failed = delivery.failed,
            "Tracking stopped"
        );
        Some(report)
    }

    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.active.as_ref().map_or(0, |active| active.session.elapsed_seconds())
    }

    /// Stop any running session before the host is discarded.
    pub async fn shutdown(&mut self) -> Option<TrackingReport> {
        self.stop_tracking().await
    }

    fn require_user(&self) -> Result<&UserRecord> {
        self.user.as_ref().ok_or_else(|| TrackerError::Auth("not signed in".into()))
    }

    fn ensure_selection_unlocked(&self) -> Result<()> {
        if self.active.is_some() {
            return Err(TrackerError::SessionState(
                "project and task cannot change while tracking".into(),
            ));
        }
        Ok(())
    }
}

impl Drop for SessionHost {
    fn drop(&mut self) {
        if self.active.is_some() {
            warn!("SessionHost dropped while tracking; call shutdown() first");
        }
    }
}

async fn forward_windows(
    mut windows: UnboundedReceiver<TimeWindow>,
    sender: Arc<dyn TimeWindowSender>,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    while let Some(window) = windows.recv().await {
        match sender.submit_time_window(&window).await {
            Ok(()) => {
                report.delivered += 1;
                debug!(start = window.start, end = window.end, "Time window delivered");
            }
            Err(err) => {
                report.failed += 1;
                warn!(
                    start = window.start,
                    end = window.end,
                    error = %err,
                    error_type = err.label(),
                    "Failed to send time window"
                );
            }
        }
    }

    report
}

async fn relay_ticks(mut ticks: UnboundedReceiver<u64>, display: Arc<dyn ElapsedDisplay>) {
    while let Some(elapsed) = ticks.recv().await {
        display.show_elapsed(elapsed);
    }
}
