//! Error taxonomy shared across the collaborator seams

use thiserror::Error;

/// Errors returned by LLM providers.
///
/// The variants encode the retry policy: [`LlmError::Transport`] and
/// [`LlmError::RateLimited`] are retryable under backoff, everything else is
/// fatal to the extraction attempt.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Missing or invalid provider configuration (e.g. no API key)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network failure reaching the provider
    #[error("transport error: {0}")]
    Transport(String),

    /// HTTP 429 or a rate-limit marker in the provider's error text
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Malformed or error-carrying response body, authentication rejection
    #[error("provider error: {0}")]
    Provider(String),
}

impl LlmError {
    /// Whether the error should be retried under the backoff policy.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LlmError::Transport(_) | LlmError::RateLimited(_))
    }
}

/// Errors from the mail fetch/send collaborators.
#[derive(Error, Debug)]
pub enum MailError {
    /// Failure fetching or parsing messages from the mailbox
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Failure delivering a message
    #[error("send error: {0}")]
    Send(String),

    /// Malformed message content
    #[error("parse error: {0}")]
    Parse(String),
}
