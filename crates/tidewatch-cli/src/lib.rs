//! Tidewatch CLI library.
//!
//! Argument parsing, configuration assembly, and command implementations for
//! the `tidewatch` binary.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extractor;

pub use cli::{Cli, Command, Settings};
pub use config::AppConfig;
pub use error::CliError;
pub use extractor::AnyExtractor;
