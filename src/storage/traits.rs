//! Storage trait definitions.

use async_trait::async_trait;

use crate::entities::{ProjectRecord, TaskRecord};
use crate::errors::PlannerResult;

/// Storage capability for persisting the two flat collections.
///
/// Adapters implement this interface explicitly; callers depend on the trait
/// and never probe a concrete adapter for capabilities.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Get storage type identifier
    fn storage_type(&self) -> &'static str;

    /// Initialize storage (create directories, etc.)
    async fn initialize(&self) -> PlannerResult<()>;

    /// Check if storage is initialized
    async fn is_initialized(&self) -> PlannerResult<bool>;

    /// Load the flat task collection
    async fn load_task_records(&self) -> PlannerResult<Vec<TaskRecord>>;

    /// Load the flat project collection
    async fn load_project_records(&self) -> PlannerResult<Vec<ProjectRecord>>;

    /// Persist the flat task collection
    async fn save_task_records(&self, records: &[TaskRecord]) -> PlannerResult<()>;

    /// Persist the flat project collection
    async fn save_project_records(&self, records: &[ProjectRecord]) -> PlannerResult<()>;
}
