//! Flattened task item consumed by the horizon view generator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::{EisenhowerQuadrant, Task, TaskStatus};

/// Highest numeric priority (0 = most important, 3 = least).
pub const PRIORITY_HIGHEST: u8 = 0;

/// A flattened task record with project context denormalized in.
///
/// Horizon views operate on this shape alone; no project graph is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none", rename = "dueDate")]
    pub due_date: Option<DateTime<Utc>>,

    /// Numeric priority, 0 (highest) through 3 (lowest)
    #[serde(default = "default_priority")]
    pub priority: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "parentTask"
    )]
    pub parent_task: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    #[serde(default)]
    pub completed: bool,
}

fn default_priority() -> u8 {
    3
}

impl TaskItem {
    /// Create a new item with minimal required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            due_date: None,
            priority: 3,
            project: None,
            section: None,
            parent_task: None,
            labels: Vec::new(),
            completed: false,
        }
    }

    /// Set the due date (builder style)
    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Set the priority (builder style)
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Flatten a full task into the view shape.
    ///
    /// Priority follows the quadrant's selection rank; unassessed tasks land
    /// at the lowest priority.
    pub fn from_task(task: &Task) -> Self {
        let priority = match task.quadrant {
            Some(EisenhowerQuadrant::Do) => 0,
            Some(EisenhowerQuadrant::Delegate) => 1,
            Some(EisenhowerQuadrant::Decide) => 2,
            Some(EisenhowerQuadrant::Delete) | None => 3,
        };

        Self {
            id: task.id.clone(),
            title: task.description.clone(),
            description: task.notes.clone().unwrap_or_default(),
            due_date: task.due_date,
            priority,
            project: task.project.clone(),
            section: None,
            parent_task: None,
            labels: task.context.iter().cloned().collect(),
            completed: task.status == TaskStatus::Done,
        }
    }
}
