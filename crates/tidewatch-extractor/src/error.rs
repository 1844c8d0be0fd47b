//! Error types for the extraction core

use thiserror::Error;
use tidewatch_domain::LlmError;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Invalid extractor configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Fatal LLM provider error, not retried
    #[error("LLM error: {0}")]
    Llm(LlmError),

    /// Retryable failures exhausted the attempt budget
    #[error("retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Attempts made before giving up
        attempts: u32,
        /// The final retryable error
        last: LlmError,
    },

    /// The per-document deadline expired (in-flight call or backoff sleep
    /// was cancelled)
    #[error("extraction timed out")]
    Timeout,
}
