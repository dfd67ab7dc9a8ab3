#![warn(clippy::pedantic)]
// Allow common pedantic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

//! # Planner
//!
//! A Getting-Things-Done planning engine.
//!
//! This crate provides:
//! - Task and project entities linked by ID through a reconciling store
//! - File-based storage of two flat JSON collections under `.planner/`
//! - Eisenhower-matrix prioritization with a keyword heuristic or a
//!   pluggable external classifier
//! - Per-project next-action selection
//! - Time-horizon views (today, this work week, next quarter, ...)
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use planner::{FileStorage, PlanningDomain};
//!
//! let storage = Arc::new(FileStorage::new("."));
//! let domain = PlanningDomain::new(storage);
//!
//! let mut store = domain.load().await?;
//! domain.prioritize(&mut store).await;
//! domain.refresh_next_actions(&mut store);
//! domain.save(&store).await?;
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// Entity store and reconciliation
pub mod store;

// Storage layer
pub mod storage;

// Planning algorithms
pub mod engine;

// Domain facades
pub mod domain;

// Classification collaborators
pub mod ai;

// Re-export key types for convenience
pub use entities::{
    EisenhowerQuadrant, Project, ProjectRecord, Task, TaskItem, TaskRecord, TaskStatus,
};
pub use errors::{PlannerError, PlannerResult};
pub use store::PlannerStore;
pub use storage::{FileStorage, Storage};

// Re-export engine and collaborator types
pub use ai::{AnthropicClassifier, Assessment, Classifier, NextActionAdvisor};
pub use domain::PlanningDomain;
pub use engine::{
    ClassificationStrategy, Horizon, NextAction, PrioritizationEngine, PrioritizationSummary,
};
