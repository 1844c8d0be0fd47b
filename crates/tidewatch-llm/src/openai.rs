//! OpenAI Responses API provider
//!
//! Sends either a plain text prompt or a file-URL + prompt pair in one
//! request, so gazette PDFs can be handed to the provider without local
//! download. Each call is a single attempt; errors are classified into the
//! retryable/fatal taxonomy and the orchestrator decides about retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tidewatch_domain::traits::LlmProvider;
use tidewatch_domain::LlmError;

/// Default Responses API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/responses";

/// Default model (generous rate limits, enough context for a gazette issue)
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for a single provider request (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the API credential
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// OpenAI Responses API provider.
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ResponsesRequest {
    model: String,
    input: Vec<InputMessage>,
}

#[derive(Serialize)]
struct InputMessage {
    role: &'static str,
    content: Vec<InputContent>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum InputContent {
    #[serde(rename = "input_file")]
    File {
        file_url: String,
    },
    #[serde(rename = "input_text")]
    Text {
        text: String,
    },
}

#[derive(Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Deserialize)]
struct OutputContent {
    #[serde(default)]
    text: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Configuration`] when the key is empty or the HTTP
    /// client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::Configuration(format!(
                "{} is required for the OpenAI provider",
                API_KEY_VAR
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key,
            client,
        })
    }

    /// Create a provider from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, LlmError> {
        let key = std::env::var(API_KEY_VAR)
            .map_err(|_| LlmError::Configuration(format!("{} environment variable not set", API_KEY_VAR)))?;
        Self::new(key)
    }

    /// Override the API endpoint (test servers, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Use a different model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn request(&self, content: Vec<InputContent>) -> Result<String, LlmError> {
        let body = ResponsesRequest {
            model: self.model.clone(),
            input: vec![InputMessage {
                role: "user",
                content,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(format!("request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS
                || text.to_lowercase().contains("rate limit")
            {
                return Err(LlmError::RateLimited(format!("HTTP {}: {}", status, text)));
            }
            return Err(LlmError::Provider(format!("HTTP {}: {}", status, text)));
        }

        parse_answer_text(&text)
    }
}

/// Pull the answer text out of a Responses API payload.
fn parse_answer_text(body: &str) -> Result<String, LlmError> {
    let parsed: ResponsesResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::Provider(format!("failed to parse response: {}", e)))?;

    if let Some(error) = parsed.error {
        if !error.is_null() {
            return Err(LlmError::Provider(format!("API returned error: {}", error)));
        }
    }

    match parsed.status.as_deref() {
        Some("completed") => {}
        other => {
            return Err(LlmError::Provider(format!(
                "response not completed, status: {:?}",
                other
            )))
        }
    }

    parsed
        .output
        .first()
        .and_then(|item| item.content.first())
        .and_then(|c| c.text.clone())
        .ok_or_else(|| LlmError::Provider("no output text in response".to_string()))
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.request(vec![InputContent::Text {
            text: prompt.to_string(),
        }])
        .await
    }

    async fn generate_with_file(&self, file_url: &str, prompt: &str) -> Result<String, LlmError> {
        self.request(vec![
            InputContent::File {
                file_url: file_url.to_string(),
            },
            InputContent::Text {
                text: prompt.to_string(),
            },
        ])
        .await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_configuration_error() {
        let result = OpenAiProvider::new("");
        assert!(matches!(result, Err(LlmError::Configuration(_))));
    }

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new("sk-test").unwrap();
        assert_eq!(provider.model(), DEFAULT_MODEL);
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);

        let provider = provider.with_model("gpt-4o");
        assert_eq!(provider.model(), "gpt-4o");
    }

    #[test]
    fn test_parse_completed_response() {
        let body = r#"{
            "status": "completed",
            "output": [{"content": [{"text": "the answer"}]}]
        }"#;
        assert_eq!(parse_answer_text(body).unwrap(), "the answer");
    }

    #[test]
    fn test_parse_error_field_is_provider_error() {
        let body = r#"{"status": "completed", "error": {"message": "bad auth"}, "output": []}"#;
        assert!(matches!(parse_answer_text(body), Err(LlmError::Provider(_))));
    }

    #[test]
    fn test_parse_incomplete_status() {
        let body = r#"{"status": "in_progress", "output": []}"#;
        let err = parse_answer_text(body).unwrap_err();
        assert!(matches!(err, LlmError::Provider(_)));
        assert!(err.to_string().contains("in_progress"));
    }

    #[test]
    fn test_parse_missing_output() {
        let body = r#"{"status": "completed", "output": []}"#;
        assert!(matches!(parse_answer_text(body), Err(LlmError::Provider(_))));
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(matches!(parse_answer_text("not json"), Err(LlmError::Provider(_))));
    }
}
