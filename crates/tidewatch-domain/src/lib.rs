//! Tidewatch Domain Layer
//!
//! Core data model and trait interfaces for the tidewatch gazette watcher.
//! This crate defines the value objects that flow through the pipeline
//! (tracked entities, extraction results, gazette mail records, document
//! reports) and the collaborator traits that the infrastructure crates
//! implement.
//!
//! ## Key Concepts
//!
//! - **Entity**: a tracked term (person name, ID, address fragment) supplied
//!   once per run from configuration
//! - **ExtractionResult**: ordered mapping of entity → extracted information,
//!   exactly one entry per requested entity
//! - **MailMessage**: a gazette newsletter record carrying PDF source links
//! - **DocumentReport**: per-document report entry (analysis or inline error)
//!
//! ## Architecture
//!
//! Trait definitions live here; implementations live in other crates
//! (`tidewatch-llm`, `tidewatch-mail`, `tidewatch-extractor`). All data is
//! in-memory for the duration of one run; nothing is persisted.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod message;
pub mod report;
pub mod result;
pub mod traits;

// Re-exports for convenience
pub use error::{LlmError, MailError};
pub use message::MailMessage;
pub use report::DocumentReport;
pub use result::{DocumentAnalysis, EntityFinding, ExtractionResult, NO_INFORMATION};
pub use traits::{EntityExtractor, LlmProvider, MailFetcher, MailSender};
