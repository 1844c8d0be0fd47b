//! Error types for the CLI.

use thiserror::Error;

/// Errors raised while assembling the pipeline from CLI input.
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid or incomplete configuration
    #[error("configuration error: {0}")]
    Config(String),
}
