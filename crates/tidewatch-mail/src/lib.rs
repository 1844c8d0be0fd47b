//! Tidewatch Mail Layer
//!
//! Gazette newsletter parsing and report mail rendering, plus deterministic
//! mocks for the `MailFetcher` and `MailSender` traits from
//! `tidewatch-domain`.
//!
//! The SMTP/IMAP transports themselves stay outside the process: the
//! [`maildir`] module reads already-delivered RFC822 files from a spool
//! directory and writes ready-to-send HTML bodies to an outbox.

#![warn(missing_docs)]

pub mod gazette;
pub mod maildir;
pub mod report;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tidewatch_domain::{MailError, MailFetcher, MailMessage, MailSender};

pub use maildir::{FileMailbox, FileSender};

/// Mock mailbox returning a fixed set of messages, with call counting.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    messages: Arc<Mutex<Vec<MailMessage>>>,
    fail_with: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockFetcher {
    /// Create an empty mock mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock mailbox pre-loaded with messages.
    pub fn with_messages(messages: Vec<MailMessage>) -> Self {
        Self {
            messages: Arc::new(Mutex::new(messages)),
            ..Self::default()
        }
    }

    /// Make every subsequent fetch fail with the given message.
    pub fn fail_with(&self, error: impl Into<String>) {
        *self.fail_with.lock().unwrap() = Some(error.into());
    }

    /// Number of fetches made so far.
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl MailFetcher for MockFetcher {
    async fn fetch_messages(&self) -> Result<Vec<MailMessage>, MailError> {
        *self.calls.lock().unwrap() += 1;
        if let Some(error) = self.fail_with.lock().unwrap().clone() {
            return Err(MailError::Fetch(error));
        }
        Ok(self.messages.lock().unwrap().clone())
    }
}

/// A mail captured by [`MockSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    /// Subject line as handed to the sender.
    pub subject: String,
    /// Full HTML body.
    pub html_body: String,
    /// True when sent through the failure-notice channel.
    pub is_failure_notice: bool,
}

/// Mock sender recording every mail instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct MockSender {
    sent: Arc<Mutex<Vec<SentMail>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockSender {
    /// Create a recording mock sender.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail with the given message.
    pub fn fail_with(&self, error: impl Into<String>) {
        *self.fail_with.lock().unwrap() = Some(error.into());
    }

    /// All mails captured so far, in send order.
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, subject: &str, html_body: &str, is_failure_notice: bool) -> Result<(), MailError> {
        if let Some(error) = self.fail_with.lock().unwrap().clone() {
            return Err(MailError::Send(error));
        }
        self.sent.lock().unwrap().push(SentMail {
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            is_failure_notice,
        });
        Ok(())
    }
}

#[async_trait]
impl MailSender for MockSender {
    async fn send_report(&self, subject: &str, html_body: &str) -> Result<(), MailError> {
        self.record(subject, html_body, false)
    }

    async fn send_failure_notice(&self, subject: &str, html_body: &str) -> Result<(), MailError> {
        self.record(subject, html_body, true)
    }
}
