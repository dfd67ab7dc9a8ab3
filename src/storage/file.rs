//! JSON file storage adapter.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

use crate::entities::{ProjectRecord, TaskRecord};
use crate::errors::{PlannerError, PlannerResult};
use crate::storage::Storage;

/// Directory under the project root holding the collections
const PLANNER_DIR: &str = ".planner";

/// File-based storage: two independently persisted JSON arrays under
/// `.planner/` in the given root directory.
///
/// Single-writer access is assumed; concurrent external mutation of the
/// files during a run is undefined behavior.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a new file storage rooted at the given path
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn planner_dir(&self) -> PathBuf {
        self.root.join(PLANNER_DIR)
    }

    fn tasks_path(&self) -> PathBuf {
        self.planner_dir().join("tasks.json")
    }

    fn projects_path(&self) -> PathBuf {
        self.planner_dir().join("projects.json")
    }

    /// Load a JSON collection; a missing file yields an empty collection.
    async fn load_collection<T: DeserializeOwned>(&self, path: &Path) -> PlannerResult<Vec<T>> {
        match fs::read_to_string(path).await {
            Ok(content) => {
                let records: Vec<T> = serde_json::from_str(&content)?;
                Ok(records)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(PlannerError::FileReadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Persist a JSON collection, creating the directory if needed.
    async fn save_collection<T: Serialize>(&self, path: &Path, records: &[T]) -> PlannerResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(records)?;
        fs::write(path, content)
            .await
            .map_err(|e| PlannerError::FileWriteError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl Storage for FileStorage {
    fn storage_type(&self) -> &'static str {
        "file"
    }

    async fn initialize(&self) -> PlannerResult<()> {
        fs::create_dir_all(self.planner_dir()).await?;
        Ok(())
    }

    async fn is_initialized(&self) -> PlannerResult<bool> {
        Ok(fs::try_exists(self.planner_dir()).await?)
    }

    async fn load_task_records(&self) -> PlannerResult<Vec<TaskRecord>> {
        self.load_collection(&self.tasks_path()).await
    }

    async fn load_project_records(&self) -> PlannerResult<Vec<ProjectRecord>> {
        self.load_collection(&self.projects_path()).await
    }

    async fn save_task_records(&self, records: &[TaskRecord]) -> PlannerResult<()> {
        self.save_collection(&self.tasks_path(), records).await
    }

    async fn save_project_records(&self, records: &[ProjectRecord]) -> PlannerResult<()> {
        self.save_collection(&self.projects_path(), records).await
    }
}
