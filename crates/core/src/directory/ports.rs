//! Port interfaces for the project/task directory

use async_trait::async_trait;
use t3tracker_domain::{Project, Result, TaskDetail, TaskSummary, TaskTimeTotal};

/// Read access to the projects and tasks of the signed-in user
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Projects the signed-in user is assigned to.
    async fn list_assigned_projects(&self) -> Result<Vec<Project>>;

    /// All tasks of a project, with their assignees.
    async fn list_tasks_for_project(&self, project_id: &str) -> Result<Vec<TaskSummary>>;

    async fn task_detail(&self, task_id: &str) -> Result<TaskDetail>;

    /// Time booked by `employee_id` on `task_id`.
    async fn task_time_total(&self, employee_id: &str, task_id: &str) -> Result<TaskTimeTotal>;
}
