//! Planning domain facade.
//!
//! Ties storage, the entity store, and the planning algorithms together
//! behind one injected-storage entry point.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::ai::NextActionAdvisor;
use crate::engine::{
    apply_next_actions, generate_named_view, select_next_actions, ClassificationStrategy,
    NextAction, PrioritizationEngine, PrioritizationSummary,
};
use crate::entities::TaskItem;
use crate::errors::{PlannerError, PlannerResult};
use crate::storage::Storage;
use crate::store::PlannerStore;

/// High-level planning operations over an injected storage backend.
pub struct PlanningDomain {
    storage: Arc<dyn Storage>,
    engine: PrioritizationEngine,
    advisor: Option<Arc<dyn NextActionAdvisor>>,
}

impl PlanningDomain {
    /// Create a domain with the keyword-heuristic classification strategy.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            engine: PrioritizationEngine::heuristic(),
            advisor: None,
        }
    }

    /// Replace the classification strategy (builder style).
    pub fn with_strategy(mut self, strategy: ClassificationStrategy) -> Self {
        self.engine = PrioritizationEngine::new(strategy);
        self
    }

    /// Attach a next-action advisor (builder style).
    pub fn with_advisor(mut self, advisor: Arc<dyn NextActionAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Prepare the storage backend.
    pub async fn initialize(&self) -> PlannerResult<()> {
        self.storage.initialize().await
    }

    /// Load both collections and reconcile them into a store.
    ///
    /// A malformed collection is recovered as empty so the sibling
    /// collection still loads; any other storage failure propagates.
    pub async fn load(&self) -> PlannerResult<PlannerStore> {
        let task_records = match self.storage.load_task_records().await {
            Ok(records) => records,
            Err(PlannerError::JsonParseError { reason }) => {
                warn!(reason = %reason, "task collection malformed, treating as empty");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let project_records = match self.storage.load_project_records().await {
            Ok(records) => records,
            Err(PlannerError::JsonParseError { reason }) => {
                warn!(reason = %reason, "project collection malformed, treating as empty");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        Ok(PlannerStore::reconcile(task_records, project_records))
    }

    /// Persist both collections from the store.
    pub async fn save(&self, store: &PlannerStore) -> PlannerResult<()> {
        self.storage.save_task_records(&store.task_records()).await?;
        self.storage
            .save_project_records(&store.project_records())
            .await?;

        info!(
            tasks = store.tasks().len(),
            projects = store.projects().len(),
            storage = self.storage.storage_type(),
            "planner state saved"
        );
        Ok(())
    }

    /// Assign Eisenhower quadrants to every eligible task, as of now.
    pub async fn prioritize(&self, store: &mut PlannerStore) -> PrioritizationSummary {
        self.prioritize_at(store, Utc::now()).await
    }

    /// Assign quadrants relative to an explicit reference time.
    pub async fn prioritize_at(
        &self,
        store: &mut PlannerStore,
        now: DateTime<Utc>,
    ) -> PrioritizationSummary {
        self.engine.prioritize_all(store, now).await
    }

    /// Select one next action per project and write the designations back.
    pub fn refresh_next_actions(&self, store: &mut PlannerStore) -> Vec<NextAction> {
        let selections = select_next_actions(store);
        apply_next_actions(store, &selections);
        selections
    }

    /// Ask the configured advisor for a concrete next action for a project.
    pub async fn suggest_next_action(
        &self,
        store: &PlannerStore,
        project_id: &str,
    ) -> PlannerResult<String> {
        let project = store
            .project(project_id)
            .ok_or_else(|| PlannerError::ProjectNotFound {
                project_id: project_id.to_string(),
            })?;

        let advisor = self.advisor.as_ref().ok_or_else(|| {
            PlannerError::Classification("no next-action advisor configured".to_string())
        })?;

        advisor.suggest(&project.name, project.outcome.as_deref()).await
    }

    /// Flatten the store's tasks and generate a named horizon view.
    pub fn horizon_view(
        &self,
        store: &PlannerStore,
        horizon: &str,
        now: DateTime<Utc>,
    ) -> PlannerResult<Vec<TaskItem>> {
        let items: Vec<TaskItem> = store.tasks().iter().map(TaskItem::from_task).collect();
        generate_named_view(&items, horizon, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EisenhowerQuadrant, Project, Task, TaskStatus};
    use crate::storage::FileStorage;
    use chrono::Duration;
    use tempfile::TempDir;
    use tokio::fs;

    async fn domain_in(temp: &TempDir) -> PlanningDomain {
        let domain = PlanningDomain::new(Arc::new(FileStorage::new(temp.path())));
        domain.initialize().await.unwrap();
        domain
    }

    fn actionable(description: &str, project_id: &str) -> Task {
        let mut task = Task::new(description);
        task.status = TaskStatus::ProjectTask;
        task.actionable = Some(true);
        task.project = Some(project_id.to_string());
        task
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let domain = domain_in(&temp).await;

        let mut store = PlannerStore::new();
        let mut project = Project::new("Kitchen renovation");
        project.id = "p1".to_string();
        store.add_project(project);
        store.add_task(actionable("Call contractors", "p1"));

        domain.save(&store).await.unwrap();
        let loaded = domain.load().await.unwrap();

        assert_eq!(loaded.tasks().len(), 1);
        assert_eq!(
            loaded.project("p1").unwrap().task_ids,
            vec![store.tasks()[0].id.clone()]
        );
    }

    #[tokio::test]
    async fn test_malformed_tasks_leave_projects_intact() {
        let temp = TempDir::new().unwrap();
        let domain = domain_in(&temp).await;

        let mut store = PlannerStore::new();
        store.add_project(Project::new("Survivor"));
        domain.save(&store).await.unwrap();

        fs::write(temp.path().join(".planner/tasks.json"), "{corrupt")
            .await
            .unwrap();

        let loaded = domain.load().await.unwrap();
        assert!(loaded.tasks().is_empty());
        assert_eq!(loaded.projects().len(), 1);
        assert_eq!(loaded.projects()[0].name, "Survivor");
    }

    #[tokio::test]
    async fn test_prioritize_and_refresh_persists() {
        let temp = TempDir::new().unwrap();
        let domain = domain_in(&temp).await;

        let mut store = PlannerStore::new();
        let mut project = Project::new("Taxes");
        project.id = "p1".to_string();
        store.add_project(project);
        store.add_task(actionable("Urgent important filing", "p1"));
        store.add_task(actionable("Sort receipts", "p1"));

        domain.prioritize(&mut store).await;
        let selections = domain.refresh_next_actions(&mut store);
        domain.save(&store).await.unwrap();

        assert_eq!(selections.len(), 1);
        let winner_id = selections[0].task_id.clone();

        let loaded = domain.load().await.unwrap();
        let winner = loaded.task(&winner_id).unwrap();
        assert_eq!(winner.quadrant, Some(EisenhowerQuadrant::Do));
        assert_eq!(winner.next_action_for, vec!["p1".to_string()]);
    }

    #[tokio::test]
    async fn test_suggest_without_advisor_is_an_error() {
        let temp = TempDir::new().unwrap();
        let domain = domain_in(&temp).await;

        let mut store = PlannerStore::new();
        let mut project = Project::new("Anything");
        project.id = "p1".to_string();
        store.add_project(project);

        let result = domain.suggest_next_action(&store, "p1").await;
        assert!(matches!(result, Err(PlannerError::Classification(_))));

        let missing = domain.suggest_next_action(&store, "nope").await;
        assert!(matches!(
            missing,
            Err(PlannerError::ProjectNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_horizon_view_from_store() {
        let temp = TempDir::new().unwrap();
        let domain = domain_in(&temp).await;
        let now = Utc::now();

        let mut store = PlannerStore::new();
        let mut due_today = Task::new("Pay rent");
        due_today.due_date = Some(now);
        let mut far_out = Task::new("Plan summer trip");
        far_out.due_date = Some(now + Duration::days(90));
        store.add_task(due_today);
        store.add_task(far_out);

        let view = domain.horizon_view(&store, "today", now).unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].title, "Pay rent");

        assert!(matches!(
            domain.horizon_view(&store, "whenever", now),
            Err(PlannerError::InvalidHorizon { .. })
        ));
    }
}
