//! File-based mail transports
//!
//! The deployment drops incoming newsletter messages as `.eml` files into a
//! spool directory (procmail rule, IMAP sync job, or similar), and picks up
//! rendered reports as `.html` files from an outbox directory that the real
//! MTA watches. This keeps SMTP/IMAP credentials out of the process entirely.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use tidewatch_domain::{MailError, MailFetcher, MailMessage, MailSender};

use crate::gazette::parse_gazette_message;

/// Mailbox that reads gazette messages from `.eml` files in a directory.
///
/// Non-newsletter messages and unparseable files are skipped with a log
/// entry; only a missing or unreadable directory is an error.
#[derive(Debug, Clone)]
pub struct FileMailbox {
    dir: PathBuf,
}

impl FileMailbox {
    /// Create a mailbox over the given spool directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The spool directory this mailbox reads.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl MailFetcher for FileMailbox {
    async fn fetch_messages(&self) -> Result<Vec<MailMessage>, MailError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| MailError::Fetch(format!("cannot read {}: {e}", self.dir.display())))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| MailError::Fetch(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "eml") {
                paths.push(path);
            }
        }
        // Directory order is arbitrary; process oldest naming first.
        paths.sort();

        let mut messages = Vec::new();
        for path in paths {
            let raw = match tokio::fs::read(&path).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot read message file, skipping");
                    continue;
                }
            };

            match parse_gazette_message(&raw) {
                Ok(Some(message)) => {
                    debug!(path = %path.display(), subject = message.subject.as_str(), "accepted message");
                    messages.push(message);
                }
                Ok(None) => {
                    debug!(path = %path.display(), "not a gazette newsletter, skipping");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unparseable message, skipping");
                }
            }
        }

        info!(dir = %self.dir.display(), count = messages.len(), "mailbox scan complete");
        Ok(messages)
    }
}

/// Sender that writes rendered mails as `.html` files into an outbox
/// directory.
#[derive(Debug, Clone)]
pub struct FileSender {
    dir: PathBuf,
}

impl FileSender {
    /// Create a sender over the given outbox directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn write(&self, prefix: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| MailError::Send(format!("cannot create {}: {e}", self.dir.display())))?;

        let filename = format!("{prefix}-{}.html", Utc::now().format("%Y%m%dT%H%M%S%.3f"));
        let path = self.dir.join(filename);

        // Subject travels in an HTML comment so the MTA job can recover it.
        let contents = format!("<!-- Subject: {subject} -->\n{html_body}");
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| MailError::Send(format!("cannot write {}: {e}", path.display())))?;

        info!(path = %path.display(), subject, "mail written to outbox");
        Ok(())
    }
}

#[async_trait]
impl MailSender for FileSender {
    async fn send_report(&self, subject: &str, html_body: &str) -> Result<(), MailError> {
        self.write("report", subject, html_body).await
    }

    async fn send_failure_notice(&self, subject: &str, html_body: &str) -> Result<(), MailError> {
        self.write("failure", subject, html_body).await
    }
}
