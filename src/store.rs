//! ID-indexed entity store and storage reconciliation.
//!
//! The store is the arena holding all loaded tasks and projects. Cross-entity
//! relationships are ID fields resolved through the store, never live object
//! pointers, so the graph is acyclic and serializes as two flat collections.

use std::collections::HashSet;

use tracing::debug;

use crate::entities::{Project, ProjectRecord, Task, TaskRecord};

/// In-memory arena of tasks and projects, in load order.
#[derive(Debug, Clone, Default)]
pub struct PlannerStore {
    tasks: Vec<Task>,
    projects: Vec<Project>,
}

impl PlannerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the bidirectional Task↔Project graph from two independently
    /// persisted flat collections.
    ///
    /// Two-pass algorithm over the raw records:
    /// 1. hydrate each collection against the opposite side's ID set;
    /// 2. task-side pass: a task naming a known owning project is appended to
    ///    that project's list (duplicate-guarded);
    /// 3. project-side pass: project lists may name tasks the task-side pass
    ///    missed; known, not-yet-linked IDs are appended.
    ///
    /// Dangling references are dropped silently; reconciliation never fails.
    /// Running it twice over the same input yields identical relationship
    /// sets with no duplicates.
    pub fn reconcile(task_records: Vec<TaskRecord>, project_records: Vec<ProjectRecord>) -> Self {
        let known_projects: HashSet<&str> =
            project_records.iter().map(|r| r.id.as_str()).collect();
        let known_tasks: HashSet<&str> = task_records.iter().map(|r| r.id.as_str()).collect();

        let tasks: Vec<Task> = task_records
            .iter()
            .cloned()
            .map(|r| Task::from_record(r, &known_projects))
            .collect();

        let mut projects: Vec<Project> = project_records
            .iter()
            .cloned()
            .map(|r| Project::from_record(r, &known_tasks))
            .collect();

        // Re-derive ownership lists from scratch so both passes see the same
        // starting state regardless of what the project records carried.
        for project in &mut projects {
            project.task_ids.clear();
        }

        // Task-side pass
        let mut linked = 0usize;
        for record in &task_records {
            if let Some(project_id) = &record.project {
                if let Some(project) = projects.iter_mut().find(|p| &p.id == project_id) {
                    if project.link_task(&record.id) {
                        linked += 1;
                    }
                }
            }
        }

        // Project-side pass: pick up tasks the task-side records didn't claim
        let mut augmented = 0usize;
        for record in &project_records {
            if let Some(project) = projects.iter_mut().find(|p| p.id == record.id) {
                for task_id in &record.tasks {
                    if known_tasks.contains(task_id.as_str()) && project.link_task(task_id) {
                        augmented += 1;
                    }
                }
            }
        }

        debug!(
            tasks = tasks.len(),
            projects = projects.len(),
            linked,
            augmented,
            "reconciled task/project graph"
        );

        Self { tasks, projects }
    }

    /// All tasks in load order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// All projects in load order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Mutable access to all tasks
    pub fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    /// Look up a task by ID
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Look up a project by ID
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Mutable task lookup
    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Mutable project lookup
    pub fn project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    /// Add a manually created task, linking it to its project if the
    /// reference resolves.
    pub fn add_task(&mut self, task: Task) {
        if let Some(project_id) = task.project.clone() {
            if let Some(project) = self.project_mut(&project_id) {
                project.link_task(&task.id);
            }
        }
        self.tasks.push(task);
    }

    /// Add a manually created project
    pub fn add_project(&mut self, project: Project) {
        self.projects.push(project);
    }

    /// Serialize all tasks to flat records
    pub fn task_records(&self) -> Vec<TaskRecord> {
        self.tasks.iter().map(Task::to_record).collect()
    }

    /// Serialize all projects to flat records
    pub fn project_records(&self) -> Vec<ProjectRecord> {
        self.projects.iter().map(Project::to_record).collect()
    }
}
