//! Prompt templates for the classification collaborators.

use handlebars::Handlebars;
use serde::Serialize;

use crate::errors::{PlannerError, PlannerResult};

/// A prompt template with system and user messages.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Template ID
    pub id: String,
    /// System prompt template
    pub system: String,
    /// User prompt template
    pub user: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(
        id: impl Into<String>,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            system: system.into(),
            user: user.into(),
        }
    }

    /// Render the template with the given context.
    pub fn render<T: Serialize>(&self, context: &T) -> PlannerResult<(String, String)> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars
            .register_template_string("system", &self.system)
            .map_err(|e| PlannerError::Classification(format!("Invalid system template: {e}")))?;

        handlebars
            .register_template_string("user", &self.user)
            .map_err(|e| PlannerError::Classification(format!("Invalid user template: {e}")))?;

        let system = handlebars
            .render("system", context)
            .map_err(|e| PlannerError::Classification(format!("Failed to render system prompt: {e}")))?;

        let user = handlebars
            .render("user", context)
            .map_err(|e| PlannerError::Classification(format!("Failed to render user prompt: {e}")))?;

        Ok((system, user))
    }
}

/// Context for the assess-task prompt.
#[derive(Debug, Clone, Serialize)]
pub struct AssessTaskContext {
    /// Task description to classify
    pub description: String,
}

/// Context for the suggest-next-action prompt.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestNextActionContext {
    /// Project name
    pub project_name: String,
    /// Desired outcome, if recorded
    pub outcome: Option<String>,
}

/// Get the assess-task template.
pub fn assess_task_template() -> PromptTemplate {
    PromptTemplate::new("assess-task", ASSESS_SYSTEM_PROMPT, ASSESS_USER_PROMPT)
}

/// Get the suggest-next-action template.
pub fn suggest_next_action_template() -> PromptTemplate {
    PromptTemplate::new(
        "suggest-next-action",
        SUGGEST_SYSTEM_PROMPT,
        SUGGEST_USER_PROMPT,
    )
}

const ASSESS_SYSTEM_PROMPT: &str = r#"You classify personal tasks on the Eisenhower matrix. Given a task description, decide whether the task is urgent (time-pressured, consequences if delayed) and whether it is important (meaningfully advances the person's goals or obligations).

IMPORTANT: Respond with a single JSON object and nothing else:
{
  "urgent": true | false | null,
  "important": true | false | null,
  "rationale": "one or two sentences explaining the verdict"
}

Use null only when the description genuinely gives no signal either way."#;

const ASSESS_USER_PROMPT: &str = r#"Classify this task:

{{description}}"#;

const SUGGEST_SYSTEM_PROMPT: &str = r#"You are a Getting-Things-Done coach. Given a project and its desired outcome, propose the single smallest concrete physical next action that moves the project forward. Respond with one imperative sentence and nothing else."#;

const SUGGEST_USER_PROMPT: &str = r#"Project: {{project_name}}
{{#if outcome}}Desired outcome: {{outcome}}{{/if}}

What is the next action?"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assess_template_rendering() {
        let template = assess_task_template();
        let context = AssessTaskContext {
            description: "File the tax return before Friday".to_string(),
        };

        let (system, user) = template.render(&context).unwrap();
        assert!(system.contains("Eisenhower"));
        assert!(user.contains("File the tax return before Friday"));
    }

    #[test]
    fn test_suggest_template_with_outcome() {
        let template = suggest_next_action_template();
        let context = SuggestNextActionContext {
            project_name: "Kitchen renovation".to_string(),
            outcome: Some("A usable kitchen by March".to_string()),
        };

        let (_, user) = template.render(&context).unwrap();
        assert!(user.contains("Kitchen renovation"));
        assert!(user.contains("A usable kitchen by March"));
    }

    #[test]
    fn test_suggest_template_without_outcome() {
        let template = suggest_next_action_template();
        let context = SuggestNextActionContext {
            project_name: "Inbox zero".to_string(),
            outcome: None,
        };

        let (_, user) = template.render(&context).unwrap();
        assert!(user.contains("Inbox zero"));
        assert!(!user.contains("Desired outcome"));
    }
}
