//! Eisenhower prioritization engine.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::ai::Classifier;
use crate::entities::EisenhowerQuadrant;
use crate::store::PlannerStore;

/// Keywords signalling urgency in a task description
const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "immediate",
    "asap",
    "emergency",
    "deadline",
    "critical",
];

/// Keywords signalling importance in a task description
const IMPORTANT_KEYWORDS: &[&str] = &[
    "important",
    "priority",
    "significant",
    "essential",
    "crucial",
];

/// How classification signals are obtained, chosen once at construction.
#[derive(Clone)]
pub enum ClassificationStrategy {
    /// Keyword scan plus the deterministic due-date signal
    Heuristic,
    /// External collaborator, with the due-date signal as an override
    External(Arc<dyn Classifier>),
}

/// Outcome counts for one prioritization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrioritizationSummary {
    /// Tasks that received a quadrant
    pub assessed: usize,
    /// Tasks ineligible for assessment
    pub skipped: usize,
    /// Eligible tasks whose classification soft-failed
    pub failed: usize,
}

/// Assigns an Eisenhower quadrant to every eligible task in a store.
pub struct PrioritizationEngine {
    strategy: ClassificationStrategy,
}

impl PrioritizationEngine {
    /// Create an engine using the keyword heuristic
    pub fn heuristic() -> Self {
        Self {
            strategy: ClassificationStrategy::Heuristic,
        }
    }

    /// Create an engine backed by an external classifier
    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            strategy: ClassificationStrategy::External(classifier),
        }
    }

    /// Create an engine with an explicit strategy
    pub fn new(strategy: ClassificationStrategy) -> Self {
        Self { strategy }
    }

    /// Assess every task in the store, sequentially.
    ///
    /// Ineligible tasks have their quadrant cleared. A collaborator failure
    /// on one task never aborts the batch.
    pub async fn prioritize_all(
        &self,
        store: &mut PlannerStore,
        now: DateTime<Utc>,
    ) -> PrioritizationSummary {
        let mut summary = PrioritizationSummary::default();

        for task in store.tasks_mut() {
            if !task.is_assessable() {
                task.quadrant = None;
                summary.skipped += 1;
                continue;
            }

            let due_soon = task.is_due_soon(now);
            match self.classify(&task.id, &task.description, due_soon).await {
                Some(quadrant) => {
                    task.quadrant = Some(quadrant);
                    summary.assessed += 1;
                }
                None => {
                    task.quadrant = None;
                    summary.failed += 1;
                }
            }
        }

        info!(
            assessed = summary.assessed,
            skipped = summary.skipped,
            failed = summary.failed,
            "prioritization run complete"
        );

        summary
    }

    /// Resolve the urgent/important signals for one eligible task.
    ///
    /// Returns `None` on soft failure (collaborator error, null verdict, or
    /// an unresolvable signal).
    async fn classify(
        &self,
        task_id: &str,
        description: &str,
        due_soon: bool,
    ) -> Option<EisenhowerQuadrant> {
        let (urgent, important) = match &self.strategy {
            ClassificationStrategy::Heuristic => {
                // Due-soon wins outright; no keyword scan needed
                let urgent = due_soon || contains_any(description, URGENT_KEYWORDS);
                let important = contains_any(description, IMPORTANT_KEYWORDS);
                (urgent, important)
            }
            ClassificationStrategy::External(classifier) => {
                let assessment = match classifier.assess(description).await {
                    Ok(Some(assessment)) => assessment,
                    Ok(None) => {
                        warn!(task_id, "classifier returned no assessment");
                        return None;
                    }
                    Err(e) => {
                        warn!(task_id, error = %e, "classification failed");
                        return None;
                    }
                };

                let mut urgent = assessment.urgent;
                let mut rationale = assessment.rationale;

                // The due-date signal overrides anything short of an explicit
                // "urgent" verdict, and never overrides one.
                if due_soon && urgent != Some(true) {
                    urgent = Some(true);
                    if !rationale.is_empty() {
                        rationale.push(' ');
                    }
                    rationale.push_str("[override: due within one day, marked urgent]");
                }

                match (urgent, assessment.important) {
                    (Some(u), Some(i)) => {
                        debug!(task_id, urgent = u, important = i, rationale = %rationale, "assessed");
                        (u, i)
                    }
                    _ => {
                        warn!(task_id, rationale = %rationale, "incomplete assessment, quadrant unassigned");
                        return None;
                    }
                }
            }
        };

        Some(EisenhowerQuadrant::from_signals(urgent, important))
    }
}

/// Case-insensitive substring match against a keyword set
fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    keywords.iter().any(|k| lowered.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Assessment;
    use crate::entities::{Task, TaskStatus};
    use crate::errors::{PlannerError, PlannerResult};
    use async_trait::async_trait;
    use chrono::Duration;
    use std::collections::HashMap;

    fn actionable_task(id: &str, description: &str) -> Task {
        let mut task = Task::new(description);
        task.id = id.to_string();
        task.status = TaskStatus::NextAction;
        task.actionable = Some(true);
        task
    }

    fn store_of(tasks: Vec<Task>) -> PlannerStore {
        let mut store = PlannerStore::new();
        for task in tasks {
            store.add_task(task);
        }
        store
    }

    /// Classifier returning canned verdicts keyed by description.
    struct StubClassifier {
        verdicts: HashMap<String, PlannerResult<Option<Assessment>>>,
    }

    impl StubClassifier {
        fn new() -> Self {
            Self {
                verdicts: HashMap::new(),
            }
        }

        fn verdict(
            mut self,
            description: &str,
            result: PlannerResult<Option<Assessment>>,
        ) -> Self {
            self.verdicts.insert(description.to_string(), result);
            self
        }
    }

    #[async_trait]
    impl Classifier for StubClassifier {
        fn name(&self) -> &str {
            "stub"
        }

        async fn assess(&self, description: &str) -> PlannerResult<Option<Assessment>> {
            self.verdicts
                .get(description)
                .cloned()
                .unwrap_or(Ok(None))
        }
    }

    fn assessment(urgent: Option<bool>, important: Option<bool>) -> Assessment {
        Assessment {
            urgent,
            important,
            rationale: "stub verdict".to_string(),
        }
    }

    #[tokio::test]
    async fn test_heuristic_quadrants_from_keywords() {
        let mut store = store_of(vec![
            actionable_task("t1", "Urgent and important tax filing"),
            actionable_task("t2", "Important strategic planning"),
            actionable_task("t3", "Urgent phone call"),
            actionable_task("t4", "Water the plants"),
        ]);

        let engine = PrioritizationEngine::heuristic();
        let summary = engine.prioritize_all(&mut store, Utc::now()).await;

        assert_eq!(summary.assessed, 4);
        assert_eq!(
            store.task("t1").unwrap().quadrant,
            Some(EisenhowerQuadrant::Do)
        );
        assert_eq!(
            store.task("t2").unwrap().quadrant,
            Some(EisenhowerQuadrant::Decide)
        );
        assert_eq!(
            store.task("t3").unwrap().quadrant,
            Some(EisenhowerQuadrant::Delegate)
        );
        assert_eq!(
            store.task("t4").unwrap().quadrant,
            Some(EisenhowerQuadrant::Delete)
        );
    }

    #[tokio::test]
    async fn test_heuristic_due_soon_forces_urgent() {
        let now = Utc::now();
        let mut task = actionable_task("t1", "Water the plants");
        task.due_date = Some(now + Duration::hours(12));
        let mut store = store_of(vec![task]);

        let engine = PrioritizationEngine::heuristic();
        engine.prioritize_all(&mut store, now).await;

        // Urgent purely from the due date, no keywords present
        assert_eq!(
            store.task("t1").unwrap().quadrant,
            Some(EisenhowerQuadrant::Delegate)
        );
    }

    #[tokio::test]
    async fn test_ineligible_tasks_are_skipped_and_cleared() {
        let mut done = actionable_task("t1", "Finished urgent thing");
        done.status = TaskStatus::Done;
        done.quadrant = Some(EisenhowerQuadrant::Do);

        let mut unknown = actionable_task("t2", "Mystery item");
        unknown.actionable = None;

        let mut someday = actionable_task("t3", "Learn woodworking someday");
        someday.status = TaskStatus::SomedayMaybe;

        let mut store = store_of(vec![done, unknown, someday]);
        let engine = PrioritizationEngine::heuristic();
        let summary = engine.prioritize_all(&mut store, Utc::now()).await;

        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.assessed, 0);
        for task in store.tasks() {
            assert_eq!(task.quadrant, None);
        }
    }

    #[tokio::test]
    async fn test_external_verdict_adopted() {
        let classifier = StubClassifier::new().verdict(
            "Renew passport",
            Ok(Some(assessment(Some(false), Some(true)))),
        );
        let mut store = store_of(vec![actionable_task("t1", "Renew passport")]);

        let engine = PrioritizationEngine::with_classifier(Arc::new(classifier));
        engine.prioritize_all(&mut store, Utc::now()).await;

        assert_eq!(
            store.task("t1").unwrap().quadrant,
            Some(EisenhowerQuadrant::Decide)
        );
    }

    #[tokio::test]
    async fn test_due_date_overrides_external_not_urgent() {
        let now = Utc::now();
        let classifier = StubClassifier::new().verdict(
            "Renew passport",
            Ok(Some(assessment(Some(false), Some(true)))),
        );
        let mut task = actionable_task("t1", "Renew passport");
        task.due_date = Some(now + Duration::hours(6));
        let mut store = store_of(vec![task]);

        let engine = PrioritizationEngine::with_classifier(Arc::new(classifier));
        engine.prioritize_all(&mut store, now).await;

        // not-urgent verdict flipped by the due date: DECIDE becomes DO
        assert_eq!(
            store.task("t1").unwrap().quadrant,
            Some(EisenhowerQuadrant::Do)
        );
    }

    #[tokio::test]
    async fn test_due_date_fills_null_urgent() {
        let now = Utc::now();
        let classifier = StubClassifier::new().verdict(
            "Renew passport",
            Ok(Some(assessment(None, Some(true)))),
        );
        let mut task = actionable_task("t1", "Renew passport");
        task.due_date = Some(now + Duration::hours(6));
        let mut store = store_of(vec![task]);

        let engine = PrioritizationEngine::with_classifier(Arc::new(classifier));
        let summary = engine.prioritize_all(&mut store, now).await;

        assert_eq!(summary.assessed, 1);
        assert_eq!(
            store.task("t1").unwrap().quadrant,
            Some(EisenhowerQuadrant::Do)
        );
    }

    #[tokio::test]
    async fn test_incomplete_assessment_is_soft_failure() {
        let classifier = StubClassifier::new().verdict(
            "Vague thing",
            Ok(Some(assessment(Some(true), None))),
        );
        let mut store = store_of(vec![
            actionable_task("t1", "Vague thing"),
            actionable_task("t2", "Also unknown to the stub"),
        ]);

        let engine = PrioritizationEngine::with_classifier(Arc::new(classifier));
        let summary = engine.prioritize_all(&mut store, Utc::now()).await;

        // Both soft-fail (null important, null verdict), neither aborts the run
        assert_eq!(summary.failed, 2);
        assert_eq!(store.task("t1").unwrap().quadrant, None);
        assert_eq!(store.task("t2").unwrap().quadrant, None);
    }

    #[tokio::test]
    async fn test_classifier_error_does_not_abort_batch() {
        let classifier = StubClassifier::new()
            .verdict(
                "Broken",
                Err(PlannerError::Classification("boom".to_string())),
            )
            .verdict("Fine", Ok(Some(assessment(Some(true), Some(true)))));

        let mut store = store_of(vec![
            actionable_task("t1", "Broken"),
            actionable_task("t2", "Fine"),
        ]);

        let engine = PrioritizationEngine::with_classifier(Arc::new(classifier));
        let summary = engine.prioritize_all(&mut store, Utc::now()).await;

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.assessed, 1);
        assert_eq!(store.task("t1").unwrap().quadrant, None);
        assert_eq!(
            store.task("t2").unwrap().quadrant,
            Some(EisenhowerQuadrant::Do)
        );
    }
}
