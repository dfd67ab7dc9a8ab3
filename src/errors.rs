//! Error types for the planner crate.

use thiserror::Error;

/// Comprehensive error types for the planning engine
#[derive(Error, Debug, Clone)]
pub enum PlannerError {
    // Entity errors
    #[error("Task '{task_id}' not found")]
    TaskNotFound { task_id: String },

    #[error("Project '{project_id}' not found")]
    ProjectNotFound { project_id: String },

    #[error("Invalid status: '{status}'")]
    InvalidStatus { status: String },

    #[error("Invalid Eisenhower quadrant: '{quadrant}'")]
    InvalidQuadrant { quadrant: String },

    // View errors
    #[error("Unrecognized planning horizon: '{horizon}'")]
    InvalidHorizon { horizon: String },

    // Storage errors
    #[error("Storage error: {reason}")]
    StorageError { reason: String },

    #[error("Failed to read file '{path}': {reason}")]
    FileReadError { path: String, reason: String },

    #[error("Failed to write file '{path}': {reason}")]
    FileWriteError { path: String, reason: String },

    #[error("Failed to parse JSON: {reason}")]
    JsonParseError { reason: String },

    #[error("Planner storage not initialized")]
    NotInitialized,

    // Classification errors
    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Classification response parse error: {reason}")]
    ClassificationParseError { reason: String },

    // General errors
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Internal error: {reason}")]
    Internal { reason: String },
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParseError {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
