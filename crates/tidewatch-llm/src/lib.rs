//! Tidewatch LLM Provider Layer
//!
//! Pluggable implementations of the `LlmProvider` trait from
//! `tidewatch-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic mock for testing, with scripted outcomes
//! - `OpenAiProvider`: OpenAI Responses API client (text and file-URL input)
//!
//! Providers perform exactly one request per call and classify failures into
//! the retryable/fatal taxonomy of [`tidewatch_domain::LlmError`]; the
//! backoff loop lives in the extraction orchestrator.
//!
//! # Examples
//!
//! ```
//! use tidewatch_llm::MockProvider;
//! use tidewatch_domain::traits::LlmProvider;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tidewatch_domain::traits::LlmProvider;
use tidewatch_domain::LlmError;

pub use openai::OpenAiProvider;

/// Mock LLM provider for deterministic testing.
///
/// Returns a fixed default answer, optionally preceded by a scripted queue of
/// per-call outcomes (successes or errors) so retry behavior can be driven
/// precisely. Records the instant of every call, which together with tokio's
/// paused test clock makes backoff delays observable.
///
/// # Examples
///
/// ```
/// use tidewatch_llm::MockProvider;
/// use tidewatch_domain::{traits::LlmProvider, LlmError};
///
/// # tokio_test::block_on(async {
/// let provider = MockProvider::new("answer");
/// provider.push_err(LlmError::RateLimited("HTTP 429".into()));
///
/// assert!(provider.generate("p").await.is_err());
/// assert_eq!(provider.generate("p").await.unwrap(), "answer");
/// assert_eq!(provider.call_count(), 2);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    script: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    calls: Arc<Mutex<Vec<tokio::time::Instant>>>,
}

impl MockProvider {
    /// Create a mock returning a fixed answer for every call.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a scripted success for the next call.
    pub fn push_ok(&self, response: impl Into<String>) {
        self.script.lock().unwrap().push_back(Ok(response.into()));
    }

    /// Queue a scripted error for the next call.
    pub fn push_err(&self, error: LlmError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Number of calls made so far (both `generate` variants).
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Instants at which calls were made, in order.
    pub fn call_instants(&self) -> Vec<tokio::time::Instant> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self) {
        self.calls.lock().unwrap().push(tokio::time::Instant::now());
    }

    fn next_outcome(&self) -> Result<String, LlmError> {
        match self.script.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        self.record_call();
        self.next_outcome()
    }

    async fn generate_with_file(&self, _file_url: &str, _prompt: &str) -> Result<String, LlmError> {
        self.record_call();
        self.next_outcome()
    }

    fn model(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_scripted_outcomes() {
        let provider = MockProvider::new("fallback");
        provider.push_err(LlmError::Transport("unreachable".into()));
        provider.push_ok("scripted");

        assert!(provider.generate("p").await.is_err());
        assert_eq!(provider.generate("p").await.unwrap(), "scripted");
        assert_eq!(provider.generate("p").await.unwrap(), "fallback");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").await.unwrap();
        provider.generate_with_file("https://example.test/a.pdf", "prompt2").await.unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").await.unwrap();

        // Both share the same counters through the Arc.
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
