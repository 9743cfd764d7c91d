//! Tasks

use serde::{Deserialize, Serialize};

use crate::models::Links;

/// A Flux script run on a schedule
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task ID
    pub id: String,
    /// ID of the organization owning the task
    #[serde(rename = "orgID")]
    pub org_id: String,
    /// Task name
    #[serde(default)]
    pub name: String,
    /// Name of the organization owning the task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// Task description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the task runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// The Flux script to run for this task.
    #[serde(default)]
    pub flux: String,
    /// Interval at which the task runs, e.g. `1h`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub every: Option<String>,
    /// Cron expression that defines the schedule on which the task runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
    /// Time the task was created, RFC3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Time the task was last updated, RFC3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Whether a task is scheduled
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// Scheduled
    Active,
    /// Not scheduled
    Inactive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct TaskCreateRequest {
    #[serde(rename = "orgID")]
    pub(crate) org_id: String,
    pub(crate) flux: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) status: TaskStatus,
}

/// List of tasks
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tasks {
    /// Pagination links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// Tasks of this page
    #[serde(default)]
    pub tasks: Vec<Task>,
}
