//! Task entity and related types.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::PlannerError;

/// GTD task status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Inbox,
    NextAction,
    ProjectTask,
    WaitingFor,
    SomedayMaybe,
    Reference,
    Done,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inbox => write!(f, "inbox"),
            Self::NextAction => write!(f, "next-action"),
            Self::ProjectTask => write!(f, "project-task"),
            Self::WaitingFor => write!(f, "waiting-for"),
            Self::SomedayMaybe => write!(f, "someday-maybe"),
            Self::Reference => write!(f, "reference"),
            Self::Done => write!(f, "done"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "inbox" => Ok(Self::Inbox),
            "next-action" | "nextaction" => Ok(Self::NextAction),
            "project-task" | "projecttask" => Ok(Self::ProjectTask),
            "waiting-for" | "waitingfor" => Ok(Self::WaitingFor),
            "someday-maybe" | "somedaymaybe" => Ok(Self::SomedayMaybe),
            "reference" => Ok(Self::Reference),
            "done" | "completed" => Ok(Self::Done),
            _ => Err(PlannerError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Eisenhower matrix quadrants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EisenhowerQuadrant {
    /// Urgent and important
    Do,
    /// Important but not urgent
    Decide,
    /// Urgent but not important
    Delegate,
    /// Neither urgent nor important
    Delete,
}

impl EisenhowerQuadrant {
    /// Map the two classification signals to a quadrant.
    pub fn from_signals(urgent: bool, important: bool) -> Self {
        match (urgent, important) {
            (true, true) => Self::Do,
            (false, true) => Self::Decide,
            (true, false) => Self::Delegate,
            (false, false) => Self::Delete,
        }
    }
}

impl std::fmt::Display for EisenhowerQuadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Do => write!(f, "do"),
            Self::Decide => write!(f, "decide"),
            Self::Delegate => write!(f, "delegate"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl std::str::FromStr for EisenhowerQuadrant {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "do" => Ok(Self::Do),
            "decide" | "schedule" => Ok(Self::Decide),
            "delegate" => Ok(Self::Delegate),
            "delete" | "defer" => Ok(Self::Delete),
            _ => Err(PlannerError::InvalidQuadrant {
                quadrant: s.to_string(),
            }),
        }
    }
}

/// Core task structure.
///
/// Relationships are held as bare IDs (`project`, `next_action_for`) and
/// resolved through the owning store, so the graph stays acyclic and
/// serialization is trivial.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Unique identifier
    pub id: String,

    /// What the task is
    pub description: String,

    /// Free-form notes
    pub notes: Option<String>,

    /// Current GTD status
    pub status: TaskStatus,

    /// GTD context (e.g. "@computer", "@errands")
    pub context: Option<String>,

    /// Due date, if any
    pub due_date: Option<DateTime<Utc>>,

    /// ID of the owning project, if any
    pub project: Option<String>,

    /// IDs of projects that designate this task as their next action
    pub next_action_for: Vec<String>,

    /// Assigned Eisenhower quadrant (None = not assessed)
    pub quadrant: Option<EisenhowerQuadrant>,

    /// Whether the task is actionable (None = unknown)
    pub actionable: Option<bool>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Flat persisted form of a [`Task`], with references reduced to IDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", rename = "dueDate")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        rename = "nextActionFor"
    )]
    pub next_action_for: Vec<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "eisenhowerQuadrant"
    )]
    pub eisenhower_quadrant: Option<EisenhowerQuadrant>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "isActionable"
    )]
    pub is_actionable: Option<bool>,

    #[serde(rename = "creationDate")]
    pub creation_date: DateTime<Utc>,
}

impl Task {
    /// Create a new task with minimal required fields
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: description.into(),
            notes: None,
            status: TaskStatus::default(),
            context: None,
            due_date: None,
            project: None,
            next_action_for: Vec::new(),
            quadrant: None,
            actionable: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the prioritization engine may assign a quadrant to this task.
    ///
    /// Tasks that are not known-actionable, or that sit in someday/reference/
    /// done, never carry a quadrant.
    pub fn is_assessable(&self) -> bool {
        self.actionable == Some(true)
            && !matches!(
                self.status,
                TaskStatus::SomedayMaybe | TaskStatus::Reference | TaskStatus::Done
            )
    }

    /// Whether the task is due within one calendar day of `now`.
    pub fn is_due_soon(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due <= now + Duration::days(1))
    }

    /// Serialize to the flat persisted form.
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            id: self.id.clone(),
            description: self.description.clone(),
            notes: self.notes.clone(),
            status: self.status,
            context: self.context.clone(),
            due_date: self.due_date,
            project: self.project.clone(),
            next_action_for: self.next_action_for.clone(),
            eisenhower_quadrant: self.quadrant,
            is_actionable: self.actionable,
            creation_date: self.created_at,
        }
    }

    /// Rehydrate from a flat record, resolving references against the set of
    /// known project IDs.
    ///
    /// References to IDs absent from `known_projects` are dropped rather than
    /// treated as errors. A persisted quadrant on a task that is no longer
    /// assessable is discarded.
    pub fn from_record(record: TaskRecord, known_projects: &HashSet<&str>) -> Self {
        let project = record
            .project
            .filter(|id| known_projects.contains(id.as_str()));

        let mut next_action_for = Vec::new();
        for id in record.next_action_for {
            if known_projects.contains(id.as_str()) && !next_action_for.contains(&id) {
                next_action_for.push(id);
            }
        }

        let mut task = Self {
            id: record.id,
            description: record.description,
            notes: record.notes,
            status: record.status,
            context: record.context,
            due_date: record.due_date,
            project,
            next_action_for,
            quadrant: record.eisenhower_quadrant,
            actionable: record.is_actionable,
            created_at: record.creation_date,
        };

        if !task.is_assessable() {
            task.quadrant = None;
        }

        task
    }
}
