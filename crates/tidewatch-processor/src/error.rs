//! Error types for the processing orchestrator

use thiserror::Error;
use tidewatch_domain::MailError;

/// Errors that can occur during a processing run
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Invalid processor configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Mailbox or delivery failure
    #[error("mail error: {0}")]
    Mail(#[from] MailError),

    /// Every outer attempt of a run failed
    #[error("all {attempts} processing attempts failed: {last}")]
    AttemptsExhausted {
        /// Attempts made before giving up
        attempts: u32,
        /// The final attempt's error
        last: Box<ProcessError>,
    },
}
