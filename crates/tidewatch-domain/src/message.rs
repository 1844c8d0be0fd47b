//! Gazette mail message records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A gazette newsletter message with the PDF source links found in its body.
///
/// Produced by the mail fetch collaborator; messages without any PDF link are
/// filtered out before they reach the processing pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailMessage {
    /// Mailbox-assigned message identifier
    pub id: String,

    /// Message subject line
    pub subject: String,

    /// Formatted sender address ("Name <addr>" when a display name exists)
    pub from: String,

    /// Message date
    pub date: DateTime<Utc>,

    /// De-duplicated gazette PDF links found in the message body, in
    /// first-appearance order
    pub pdf_urls: Vec<String>,
}

impl MailMessage {
    /// Whether the message carries at least one PDF source.
    pub fn has_sources(&self) -> bool {
        !self.pdf_urls.is_empty()
    }
}
