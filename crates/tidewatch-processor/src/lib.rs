//! Tidewatch Processor
//!
//! The processing orchestrator: drains the mailbox, runs every referenced
//! publication through the entity extractor, and mails the rendered report.
//! Collaborators arrive through the `tidewatch-domain` traits, so the same
//! orchestrator runs against the live stack, the stub extractor, or the
//! test mocks.
//!
//! # Layers
//!
//! - [`Processor`]: one-shot passes (`run_once`) and the outer attempt loop
//!   (`run_with_retry`) with operator failure notification
//! - [`ScanWorker`]: interval-driven background operation until shutdown

#![warn(missing_docs)]

mod config;
mod error;
mod processor;
mod worker;


pub use config::ProcessorConfig;
pub use error::ProcessError;
pub use processor::{Processor, RunSummary};
pub use worker::ScanWorker;
