//! Classification collaborators for the prioritization engine.
//!
//! This module provides:
//! - The pluggable [`Classifier`] contract (urgency/importance assessment)
//! - The optional [`NextActionAdvisor`] contract (next-action suggestions)
//! - Prompt templates for both calls
//! - An Anthropic-backed implementation

pub mod anthropic;
pub mod prompts;

use async_trait::async_trait;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::{PlannerError, PlannerResult};

pub use anthropic::AnthropicClassifier;
pub use prompts::{AssessTaskContext, PromptTemplate, SuggestNextActionContext};

/// Urgency/importance verdict returned by a classification collaborator.
///
/// Either signal may come back null; the engine treats an unresolvable
/// signal as a soft failure for that task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Assessment {
    pub urgent: Option<bool>,
    pub important: Option<bool>,
    #[serde(default)]
    pub rationale: String,
}

/// External urgency/importance classifier.
///
/// A `None` return and an error are equivalent from the engine's point of
/// view: the task's quadrant stays unassigned and processing continues.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Collaborator identifier, for logging
    fn name(&self) -> &str;

    /// Assess a task description
    async fn assess(&self, description: &str) -> PlannerResult<Option<Assessment>>;
}

/// Optional collaborator that proposes a concrete next action for a project.
#[async_trait]
pub trait NextActionAdvisor: Send + Sync {
    /// Suggest a next action given the project name and desired outcome
    async fn suggest(&self, project_name: &str, outcome: Option<&str>) -> PlannerResult<String>;
}

/// Parse a JSON object out of collaborator output.
///
/// Models wrap JSON in markdown fences or prose more often than not; strip
/// fences first, then fall back to the outermost brace pair.
pub fn parse_collaborator_json<T: DeserializeOwned>(text: &str) -> PlannerResult<T> {
    let fence =
        Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("fence regex is valid");

    let candidate = if let Some(captures) = fence.captures(text) {
        captures.get(1).map_or(text, |m| m.as_str())
    } else {
        match (text.find('{'), text.rfind('}')) {
            // A closing brace before the first opening one is not a pair
            (Some(start), Some(end)) if start <= end => &text[start..=end],
            _ => text,
        }
    };

    serde_json::from_str(candidate).map_err(|e| PlannerError::ClassificationParseError {
        reason: e.to_string(),
    })
}
