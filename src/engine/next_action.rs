//! Next-action selection: one active focus per project.

use std::cmp::Ordering;

use crate::entities::{EisenhowerQuadrant, Task, TaskStatus};
use crate::store::PlannerStore;

/// Sort rank for tasks without a quadrant: always last
const UNRANKED: u32 = 999;

/// A chosen next action for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextAction {
    pub project_id: String,
    pub task_id: String,
}

/// Sort rank of a quadrant for next-action selection.
///
/// Urgency dominates: an urgent-but-unimportant task outranks an
/// important-but-not-urgent one when choosing what to touch next.
fn quadrant_rank(quadrant: Option<EisenhowerQuadrant>) -> u32 {
    match quadrant {
        Some(EisenhowerQuadrant::Do) => 0,
        Some(EisenhowerQuadrant::Delegate) => 1,
        Some(EisenhowerQuadrant::Decide) => 2,
        Some(EisenhowerQuadrant::Delete) => 3,
        None => UNRANKED,
    }
}

/// Composite ordering: quadrant rank, then due date with dated tasks first.
/// Equal keys keep their original relative order (the sort is stable).
fn compare_candidates(a: &Task, b: &Task) -> Ordering {
    quadrant_rank(a.quadrant)
        .cmp(&quadrant_rank(b.quadrant))
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Choose at most one next action per project.
///
/// Tasks without an owning project are excluded; projects with no
/// qualifying (non-done) tasks contribute no result. Results follow the
/// store's project order.
pub fn select_next_actions(store: &PlannerStore) -> Vec<NextAction> {
    let mut selections = Vec::new();

    for project in store.projects() {
        let mut candidates: Vec<&Task> = store
            .tasks()
            .iter()
            .filter(|t| t.status != TaskStatus::Done)
            .filter(|t| t.project.as_deref() == Some(project.id.as_str()))
            .collect();

        candidates.sort_by(|a, b| compare_candidates(a, b));

        if let Some(winner) = candidates.first() {
            selections.push(NextAction {
                project_id: project.id.clone(),
                task_id: winner.id.clone(),
            });
        }
    }

    selections
}

/// Write selections back into the tasks' `next_action_for` lists, clearing
/// all prior designations first so repeated selection is idempotent.
pub fn apply_next_actions(store: &mut PlannerStore, selections: &[NextAction]) {
    for task in store.tasks_mut() {
        task.next_action_for.clear();
    }

    for selection in selections {
        if let Some(task) = store.task_mut(&selection.task_id) {
            if !task.next_action_for.contains(&selection.project_id) {
                task.next_action_for.push(selection.project_id.clone());
            }
        }
    }
}
