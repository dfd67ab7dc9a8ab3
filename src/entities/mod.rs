//! Core data structures for the planning engine.

mod item;
mod project;
mod task;

pub use item::{TaskItem, PRIORITY_HIGHEST};
pub use project::{Project, ProjectRecord, DEFAULT_PROJECT_STATUS};
pub use task::{EisenhowerQuadrant, Task, TaskRecord, TaskStatus};
