//! Project entity.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default project status
pub const DEFAULT_PROJECT_STATUS: &str = "Active";

/// A GTD project: a desired outcome requiring more than one task.
///
/// Owned tasks are referenced by ID; the store resolves them.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Unique identifier
    pub id: String,

    /// Project name
    pub name: String,

    /// Desired outcome
    pub outcome: Option<String>,

    /// Free-form status (e.g. "Active", "On Hold")
    pub status: String,

    /// Ordered IDs of owned tasks
    pub task_ids: Vec<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Flat persisted form of a [`Project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,

    #[serde(default)]
    pub tasks: Vec<String>,

    #[serde(default = "default_status")]
    pub status: String,

    #[serde(rename = "creationDate")]
    pub creation_date: DateTime<Utc>,
}

fn default_status() -> String {
    DEFAULT_PROJECT_STATUS.to_string()
}

impl Project {
    /// Create a new project with minimal required fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            outcome: None,
            status: DEFAULT_PROJECT_STATUS.to_string(),
            task_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Append a task ID to the owned list, guarding against duplicates.
    ///
    /// Returns true if the task was newly linked.
    pub fn link_task(&mut self, task_id: &str) -> bool {
        if self.task_ids.iter().any(|id| id == task_id) {
            false
        } else {
            self.task_ids.push(task_id.to_string());
            true
        }
    }

    /// Serialize to the flat persisted form.
    pub fn to_record(&self) -> ProjectRecord {
        ProjectRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            outcome: self.outcome.clone(),
            tasks: self.task_ids.clone(),
            status: self.status.clone(),
            creation_date: self.created_at,
        }
    }

    /// Rehydrate from a flat record, resolving task references against the
    /// set of known task IDs. Unknown IDs are dropped, never errors.
    pub fn from_record(record: ProjectRecord, known_tasks: &HashSet<&str>) -> Self {
        let mut task_ids = Vec::new();
        for id in record.tasks {
            if known_tasks.contains(id.as_str()) && !task_ids.contains(&id) {
                task_ids.push(id);
            }
        }

        Self {
            id: record.id,
            name: record.name,
            outcome: record.outcome,
            status: record.status,
            task_ids,
            created_at: record.creation_date,
        }
    }
}
