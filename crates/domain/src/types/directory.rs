//! User, project and task records returned by the backend

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The signed-in user as returned by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Ids of the projects the user is assigned to
    #[serde(default)]
    pub projects: Vec<String>,
}

impl UserRecord {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("User")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// Task entry from the per-project task listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "employees", default)]
    pub assignee_ids: Vec<String>,
}

impl TaskSummary {
    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assignee_ids.iter().any(|id| id == user_id)
    }
}

/// Full task record; fields beyond id/name are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDetail {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Total time an employee has booked on a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTimeTotal {
    #[serde(default)]
    pub total_time_millis: i64,
}

/// A selectable task in the task picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOption {
    pub id: String,
    pub name: String,
}

/// Tasks of one project, split by assignment to the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListing {
    pub mine: Vec<TaskOption>,
    pub others: Vec<TaskOption>,
}

impl TaskListing {
    pub fn is_empty(&self) -> bool {
        self.mine.is_empty() && self.others.is_empty()
    }

    pub fn is_mine(&self, task_id: &str) -> bool {
        self.mine.iter().any(|task| task.id == task_id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn task_summary_reads_employees_as_assignees() {
        let task: TaskSummary = serde_json::from_value(json!({
            "id": "t1",
            "name": "Design review",
            "employees": ["u1", "u2"],
        }))
        .unwrap();

        assert!(task.is_assigned_to("u2"));
        assert!(!task.is_assigned_to("u3"));
    }

    #[test]
    fn task_detail_keeps_unknown_fields() {
        let detail: TaskDetail = serde_json::from_value(json!({
            "id": "t1",
            "name": "Design review (Q3)",
            "status": "open",
        }))
        .unwrap();

        assert_eq!(detail.name, "Design review (Q3)");
        assert_eq!(detail.extra.get("status"), Some(&json!("open")));
    }

    #[test]
    fn user_record_tolerates_missing_optional_fields() {
        let user: UserRecord = serde_json::from_value(json!({ "id": "u1" })).unwrap();
        assert!(user.projects.is_empty());
        assert_eq!(user.display_name(), "User");
    }

    #[test]
    fn task_time_total_defaults_to_zero() {
        let total: TaskTimeTotal = serde_json::from_value(json!({})).unwrap();
        assert_eq!(total.total_time_millis, 0);
    }
}
