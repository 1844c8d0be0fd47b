//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates (`tidewatch-llm`,
//! `tidewatch-mail`) or, for [`EntityExtractor`], in `tidewatch-extractor`.

use crate::error::{LlmError, MailError};
use crate::message::MailMessage;
use crate::result::DocumentAnalysis;
use async_trait::async_trait;

/// Trait for LLM provider operations.
///
/// Implementations perform a single request per call; retry and backoff are
/// the extraction orchestrator's responsibility, driven by
/// [`LlmError::is_retryable`].
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a plain text prompt.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Generate a completion for a prompt together with a remote document
    /// the provider fetches itself (file-URL input).
    async fn generate_with_file(&self, file_url: &str, prompt: &str) -> Result<String, LlmError>;

    /// Identifier of the underlying model, for logging and report metadata.
    fn model(&self) -> &str;
}

/// Trait for fetching candidate gazette messages from a mailbox.
///
/// The IMAP transport itself is an external collaborator; implementations
/// deliver zero or more parsed [`MailMessage`] records per poll.
#[async_trait]
pub trait MailFetcher: Send + Sync {
    /// Fetch recent gazette messages that carry PDF source links.
    async fn fetch_messages(&self) -> Result<Vec<MailMessage>, MailError>;
}

/// Trait for delivering report emails.
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Send the normal analysis report.
    async fn send_report(&self, subject: &str, html_body: &str) -> Result<(), MailError>;

    /// Send the operator failure notification (distinct from the report
    /// format, raised only when the whole pipeline fails on every attempt).
    async fn send_failure_notice(&self, subject: &str, html_body: &str) -> Result<(), MailError>;
}

/// Capability seam for entity extraction.
///
/// Exactly two operations: analyze already-extracted document text, or hand a
/// source reference to a provider that ingests the document itself. The
/// implementation (LLM-backed pipeline or canned stub) is selected once at
/// startup via configuration.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    /// Error type for extraction operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extract per-entity information from document text.
    async fn extract_from_text(
        &self,
        text: &str,
        entities: &[String],
    ) -> Result<DocumentAnalysis, Self::Error>;

    /// Extract per-entity information from a PDF source reference.
    async fn extract_from_source(
        &self,
        source_url: &str,
        entities: &[String],
    ) -> Result<DocumentAnalysis, Self::Error>;
}
