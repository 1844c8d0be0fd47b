//! Extraction orchestrator
//!
//! Drives one document through the pipeline: early-termination scan,
//! relevance filtering, chunking, provider calls with retry, answer parsing
//! and merge. All provider calls go through [`DocumentAnalyzer::call_with_retry`],
//! so backoff policy lives here rather than in the provider.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use tidewatch_domain::{DocumentAnalysis, EntityExtractor, ExtractionResult, LlmProvider};

use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use crate::filter::{filter_sentences, ultra_filter};
use crate::matcher;
use crate::chunking::LineChunker;
use crate::parser::parse_answer;
use crate::prompt::PromptBuilder;
use crate::retry::RetryState;

/// Analyzes documents for a set of tracked entities using an LLM provider.
pub struct DocumentAnalyzer<P> {
    provider: P,
    config: ExtractorConfig,
}

impl<P: LlmProvider> DocumentAnalyzer<P> {
    /// Create an analyzer over the given provider. Fails when the
    /// configuration is invalid.
    pub fn new(provider: P, config: ExtractorConfig) -> Result<Self, ExtractError> {
        config.validate().map_err(ExtractError::Config)?;
        Ok(Self { provider, config })
    }

    /// Analyze `text` for the given entities. The whole analysis is bounded
    /// by the configured extraction timeout; on expiry the in-flight work is
    /// dropped and [`ExtractError::Timeout`] returned.
    pub async fn analyze(
        &self,
        text: &str,
        entities: &[String],
    ) -> Result<DocumentAnalysis, ExtractError> {
        match timeout(self.config.extraction_timeout(), self.analyze_inner(text, entities)).await {
            Ok(result) => result,
            Err(_) => Err(ExtractError::Timeout),
        }
    }

    async fn analyze_inner(
        &self,
        text: &str,
        entities: &[String],
    ) -> Result<DocumentAnalysis, ExtractError> {
        if !entities.iter().any(|e| matcher::matches(text, e)) {
            info!("no tracked entity appears in document, skipping provider calls");
            return Ok(DocumentAnalysis::no_information(entities));
        }

        let text = self.reduce(text, entities);

        if text.len() <= self.config.chunk_char_budget {
            let prompt = PromptBuilder::new(entities.to_vec()).build_with_text(&text);
            let answer = self.call_with_retry(&prompt).await?;
            return Ok(DocumentAnalysis {
                results: parse_answer(&answer, entities),
                raw_answer: answer,
            });
        }

        self.analyze_chunked(&text, entities).await
    }

    /// Shrink the document with progressively aggressive relevance filters.
    fn reduce(&self, text: &str, entities: &[String]) -> String {
        if text.len() <= self.config.chunk_char_budget {
            return text.to_string();
        }

        let filtered = filter_sentences(text, entities);
        debug!(
            original_len = text.len(),
            filtered_len = filtered.len(),
            "applied sentence-level relevance filter"
        );

        if filtered.len() > self.config.ultra_filter_threshold {
            let ultra = ultra_filter(&filtered, entities);
            debug!(ultra_len = ultra.len(), "applied entity-only filter");
            return ultra;
        }

        filtered
    }

    async fn analyze_chunked(
        &self,
        text: &str,
        entities: &[String],
    ) -> Result<DocumentAnalysis, ExtractError> {
        let chunker = LineChunker::new(self.config.chunk_char_budget);
        let chunks = chunker.chunk_to_vec(text);
        info!(count = chunks.len(), "document exceeds chunk budget, analyzing in chunks");

        let mut merged = ExtractionResult::no_information(entities);
        let mut raw_answer = String::new();

        for (i, chunk) in chunks.iter().enumerate() {
            if i > 0 {
                sleep(self.config.inter_chunk_delay()).await;
            }

            let prompt = PromptBuilder::new(entities.to_vec()).build_with_text(chunk);
            let answer = self.call_with_retry(&prompt).await?;
            merged.merge(parse_answer(&answer, entities));

            if !raw_answer.is_empty() {
                raw_answer.push_str("\n\n");
            }
            raw_answer.push_str(&answer);
        }

        Ok(DocumentAnalysis {
            results: merged,
            raw_answer,
        })
    }

    /// One logical provider call: retries retryable errors with exponential
    /// backoff, fails fast on everything else.
    async fn call_with_retry(&self, prompt: &str) -> Result<String, ExtractError> {
        let mut state = RetryState::new(
            self.config.initial_backoff(),
            self.config.max_backoff(),
            self.config.max_retries,
        );

        loop {
            match self.provider.generate(prompt).await {
                Ok(answer) => return Ok(answer),
                Err(e) if e.is_retryable() && !state.is_exhausted() => {
                    warn!(
                        attempt = state.attempt(),
                        delay_ms = state.delay().as_millis() as u64,
                        error = %e,
                        "provider call failed, backing off"
                    );
                    sleep(state.delay()).await;
                    state = state.next();
                }
                Err(e) if e.is_retryable() => {
                    return Err(ExtractError::RetriesExhausted {
                        attempts: state.attempt(),
                        last: e,
                    });
                }
                Err(e) => return Err(ExtractError::Llm(e)),
            }
        }
    }

    async fn call_with_file_retry(&self, prompt: &str, url: &str) -> Result<String, ExtractError> {
        let mut state = RetryState::new(
            self.config.initial_backoff(),
            self.config.max_backoff(),
            self.config.max_retries,
        );

        loop {
            match self.provider.generate_with_file(url, prompt).await {
                Ok(answer) => return Ok(answer),
                Err(e) if e.is_retryable() && !state.is_exhausted() => {
                    warn!(
                        attempt = state.attempt(),
                        delay_ms = state.delay().as_millis() as u64,
                        error = %e,
                        "file analysis call failed, backing off"
                    );
                    sleep(state.delay()).await;
                    state = state.next();
                }
                Err(e) if e.is_retryable() => {
                    return Err(ExtractError::RetriesExhausted {
                        attempts: state.attempt(),
                        last: e,
                    });
                }
                Err(e) => return Err(ExtractError::Llm(e)),
            }
        }
    }

    /// Duration helper used by callers sizing their own outer timeouts.
    pub fn extraction_timeout(&self) -> Duration {
        self.config.extraction_timeout()
    }
}

#[async_trait]
impl<P: LlmProvider> EntityExtractor for DocumentAnalyzer<P> {
    type Error = ExtractError;

    async fn extract_from_text(
        &self,
        text: &str,
        entities: &[String],
    ) -> Result<DocumentAnalysis, ExtractError> {
        self.analyze(text, entities).await
    }

    async fn extract_from_source(
        &self,
        url: &str,
        entities: &[String],
    ) -> Result<DocumentAnalysis, ExtractError> {
        let prompt = PromptBuilder::new(entities.to_vec()).build();
        let fut = self.call_with_file_retry(&prompt, url);
        let answer = match timeout(self.config.extraction_timeout(), fut).await {
            Ok(result) => result?,
            Err(_) => return Err(ExtractError::Timeout),
        };

        Ok(DocumentAnalysis {
            results: parse_answer(&answer, entities),
            raw_answer: answer,
        })
    }
}
