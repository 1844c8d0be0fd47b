//! Tidewatch Extractor
//!
//! The content-filtering, chunking, and extraction core. Converts a gazette
//! document's text into per-entity findings through an LLM call, keeping the
//! request within the provider's content budget.
//!
//! # Pipeline
//!
//! ```text
//! Document text → Entity Matcher (early termination)
//!               → Relevance Filter (sentence level, then ultra)
//!               → Chunker (when still over budget)
//!               → LLM call(s) with retry/backoff
//!               → answer parsing → merged ExtractionResult
//! ```
//!
//! # Key Features
//!
//! - **Entity-aware filtering**: keeps only sentences likely related to the
//!   tracked entities or the gazette's legal vocabulary
//! - **Budgeted chunking**: line-respecting chunks, processed sequentially
//!   with an inter-request delay to respect provider rate limits
//! - **Explicit retry state**: an immutable [`RetryState`] value drives the
//!   exponential backoff machine, making it independently testable
//! - **Early termination**: documents mentioning no tracked entity are
//!   resolved without any network call
//!
//! # Example
//!
//! ```no_run
//! use tidewatch_extractor::{DocumentAnalyzer, ExtractorConfig};
//! use tidewatch_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new("Acme Corp: under konkursbehandling");
//! let analyzer = DocumentAnalyzer::new(provider, ExtractorConfig::default())?;
//!
//! let entities = vec!["Acme Corp".to_string()];
//! let analysis = analyzer
//!     .analyze("Acme Corp har indgivet konkursbegæring.", &entities)
//!     .await?;
//!
//! println!("{:?}", analysis.results.get("Acme Corp"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod config;
pub mod matcher;
pub mod filter;
pub mod chunking;
mod prompt;
mod parser;
mod retry;
mod extractor;
mod stub;

#[cfg(test)]
mod tests;

pub use chunking::LineChunker;
pub use config::ExtractorConfig;
pub use error::ExtractError;
pub use extractor::DocumentAnalyzer;
pub use prompt::PromptBuilder;
pub use retry::RetryState;
pub use stub::StubExtractor;
