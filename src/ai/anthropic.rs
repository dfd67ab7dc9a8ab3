//! Anthropic Claude classification collaborator.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::{PlannerError, PlannerResult};

use super::prompts::{
    assess_task_template, suggest_next_action_template, AssessTaskContext,
    SuggestNextActionContext,
};
use super::{parse_collaborator_json, Assessment, Classifier, NextActionAdvisor};

/// Anthropic API endpoint
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Anthropic API request message
#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

/// Anthropic API request
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Anthropic API response content
#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    text: String,
}

/// Anthropic API response
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

/// Anthropic API error
#[derive(Debug, Deserialize)]
struct AnthropicError {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

/// Anthropic API error response
#[derive(Debug, Deserialize)]
struct AnthropicErrorResponse {
    error: AnthropicError,
}

/// Anthropic-backed classifier and next-action advisor.
pub struct AnthropicClassifier {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl AnthropicClassifier {
    /// Create a new classifier with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: Some(api_key.into()),
            base_url: ANTHROPIC_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from the `ANTHROPIC_API_KEY` environment variable.
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            base_url: ANTHROPIC_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Whether an API key is available
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send one system/user exchange and return the text of the reply.
    async fn complete(&self, system: String, user: String) -> PlannerResult<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| PlannerError::Classification("ANTHROPIC_API_KEY not set".to_string()))?;

        let request = AnthropicRequest {
            model: self.model.clone(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: user,
            }],
            max_tokens: 1024,
            system: Some(system),
            temperature: Some(0.2),
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                PlannerError::Classification(format!("Anthropic API request failed: {e}"))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PlannerError::Classification(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            if let Ok(error_response) = serde_json::from_str::<AnthropicErrorResponse>(&body) {
                return Err(PlannerError::Classification(format!(
                    "Anthropic API error: {} - {}",
                    error_response.error.error_type, error_response.error.message
                )));
            }
            return Err(PlannerError::Classification(format!(
                "Anthropic API error ({status}): {body}"
            )));
        }

        let api_response: AnthropicResponse = serde_json::from_str(&body)
            .map_err(|e| PlannerError::Classification(format!("Failed to parse response: {e}")))?;

        let text = api_response
            .content
            .iter()
            .filter(|c| c.content_type == "text")
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("");

        Ok(text)
    }
}

#[async_trait]
impl Classifier for AnthropicClassifier {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn assess(&self, description: &str) -> PlannerResult<Option<Assessment>> {
        let context = AssessTaskContext {
            description: description.to_string(),
        };
        let (system, user) = assess_task_template().render(&context)?;

        let text = self.complete(system, user).await?;
        let assessment: Assessment = parse_collaborator_json(&text)?;
        Ok(Some(assessment))
    }
}

#[async_trait]
impl NextActionAdvisor for AnthropicClassifier {
    async fn suggest(&self, project_name: &str, outcome: Option<&str>) -> PlannerResult<String> {
        let context = SuggestNextActionContext {
            project_name: project_name.to_string(),
            outcome: outcome.map(String::from),
        };
        let (system, user) = suggest_next_action_template().render(&context)?;

        let text = self.complete(system, user).await?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "content": [{"type": "text", "text": text}],
            "model": DEFAULT_MODEL,
            "usage": {"input_tokens": 10, "output_tokens": 5}
        })
    }

    #[tokio::test]
    async fn test_assess_parses_verdict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(message_body(
                r#"{"urgent": true, "important": true, "rationale": "deadline-bound and consequential"}"#,
            )))
            .mount(&server)
            .await;

        let classifier = AnthropicClassifier::new("test-key")
            .with_base_url(format!("{}/v1/messages", server.uri()));

        let assessment = classifier
            .assess("File the tax return before Friday")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(assessment.urgent, Some(true));
        assert_eq!(assessment.important, Some(true));
        assert!(assessment.rationale.contains("deadline"));
    }

    #[tokio::test]
    async fn test_assess_api_error_is_classification_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"type": "rate_limit_error", "message": "slow down"}
            })))
            .mount(&server)
            .await;

        let classifier = AnthropicClassifier::new("test-key")
            .with_base_url(format!("{}/v1/messages", server.uri()));

        let result = classifier.assess("anything").await;
        match result {
            Err(PlannerError::Classification(msg)) => {
                assert!(msg.contains("rate_limit_error"));
            }
            other => panic!("expected classification error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_suggest_returns_trimmed_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(message_body(
                "  Call three contractors for quotes.\n",
            )))
            .mount(&server)
            .await;

        let classifier = AnthropicClassifier::new("test-key")
            .with_base_url(format!("{}/v1/messages", server.uri()));

        let suggestion = classifier
            .suggest("Kitchen renovation", Some("A usable kitchen by March"))
            .await
            .unwrap();

        assert_eq!(suggestion, "Call three contractors for quotes.");
    }

    #[test]
    fn test_unconfigured_without_key() {
        // Construct directly to avoid depending on the test environment
        let classifier = AnthropicClassifier {
            client: Client::new(),
            api_key: None,
            base_url: ANTHROPIC_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        };
        assert!(!classifier.is_configured());
    }
}
