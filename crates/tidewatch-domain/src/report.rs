//! Per-document report entries

use crate::message::MailMessage;
use crate::result::DocumentAnalysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The report entry for one analyzed PDF source.
///
/// A failed document becomes an inline error entry rather than aborting the
/// batch, so a best-effort report can still be sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    /// PDF source reference (URL or filename)
    pub source: String,

    /// Subject of the originating gazette message
    pub subject: String,

    /// Sender of the originating gazette message
    pub from: String,

    /// Date of the originating gazette message
    pub date: DateTime<Utc>,

    /// Analysis outcome, present on success
    pub analysis: Option<DocumentAnalysis>,

    /// Error text, present on failure
    pub error: Option<String>,
}

impl DocumentReport {
    /// Report entry for a successfully analyzed document.
    pub fn succeeded(source: impl Into<String>, message: &MailMessage, analysis: DocumentAnalysis) -> Self {
        Self {
            source: source.into(),
            subject: message.subject.clone(),
            from: message.from.clone(),
            date: message.date,
            analysis: Some(analysis),
            error: None,
        }
    }

    /// Report entry recording a per-document failure.
    pub fn failed(source: impl Into<String>, message: &MailMessage, error: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            subject: message.subject.clone(),
            from: message.from.clone(),
            date: message.date,
            analysis: None,
            error: Some(error.into()),
        }
    }

    /// Whether this entry records a failure.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
