//! Directory reads and time-window submission
//!
//! Implements the [`ProjectDirectory`] and [`TimeWindowSender`] ports on top
//! of [`ApiClient`].

use std::sync::Arc;

use async_trait::async_trait;
use t3tracker_core::{ProjectDirectory, TimeWindowSender};
use t3tracker_domain::constants::{
    ROUTE_CURRENT_USER, ROUTE_PROJECT, ROUTE_TASK, ROUTE_TASK_TIME, ROUTE_TIME_ENTRIES,
};
use t3tracker_domain::{
    Project, Result, TaskDetail, TaskSummary, TaskTimeTotal, TimeWindow, TrackerError, UserRecord,
};
use tracing::{debug, instrument, warn};
use urlencoding::encode;

use super::client::ApiClient;

/// API commands for directory and tracking operations
pub struct ApiCommands {
    client: Arc<ApiClient>,
}

impl ApiCommands {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch one project by id
    ///
    /// # Errors
    ///
    /// Returns error if the project is unknown or the API request fails
    #[instrument(skip(self))]
    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        let path = format!("{ROUTE_PROJECT}/{}", encode(project_id));
        Ok(self.client.get(&path, &[]).await?)
    }
}

#[async_trait]
impl ProjectDirectory for ApiCommands {
    /// Resolves the user's project ids via `/auth/me`, then fetches each
    /// project. One failing project fails the whole listing.
    #[instrument(skip(self))]
    async fn list_assigned_projects(&self) -> Result<Vec<Project>> {
        let user: UserRecord = self.client.get(ROUTE_CURRENT_USER, &[]).await?;

        let mut projects = Vec::with_capacity(user.projects.len());
        for project_id in &user.projects {
            projects.push(self.get_project(project_id).await?);
        }

        debug!(count = projects.len(), "Projects listed");
        Ok(projects)
    }

    #[instrument(skip(self))]
    async fn list_tasks_for_project(&self, project_id: &str) -> Result<Vec<TaskSummary>> {
        if project_id.is_empty() {
            return Err(TrackerError::InvalidInput("project id is empty".into()));
        }

        let tasks: Vec<TaskSummary> =
            self.client.get(ROUTE_TASK, &[("projectId", project_id)]).await?;

        debug!(count = tasks.len(), "Tasks listed");
        Ok(tasks)
    }

    #[instrument(skip(self))]
    async fn task_detail(&self, task_id: &str) -> Result<TaskDetail> {
        let path = format!("{ROUTE_TASK}/{}", encode(task_id));
        Ok(self.client.get(&path, &[]).await?)
    }

    #[instrument(skip(self))]
    async fn task_time_total(&self, employee_id: &str, task_id: &str) -> Result<TaskTimeTotal> {
        let query = [("employeeId", employee_id), ("taskId", task_id)];
        Ok(self.client.get(ROUTE_TASK_TIME, &query).await?)
    }
}

#[async_trait]
impl TimeWindowSender for ApiCommands {
    #[instrument(skip(self, window), fields(start = window.start, end = window.end))]
    async fn submit_time_window(&self, window: &TimeWindow) -> Result<()> {
        match self.client.post_json(ROUTE_TIME_ENTRIES, window).await {
            Ok(()) => {
                debug!(duration_ms = window.duration_ms(), "Time window accepted");
                Ok(())
            }
            Err(err) => {
                let category = err.category();
                warn!(category = category.as_str(), error = %err, "Time window rejected");
                Err(TrackerError::Delivery(format!("{}: {err}", category.as_str())))
            }
        }
    }
}
