//! Extractor selection
//!
//! The stub/live choice is made exactly once, at startup, from
//! configuration. Both variants share `ExtractError`, so the processor sees
//! a single extractor type either way.

use async_trait::async_trait;

use tidewatch_domain::{DocumentAnalysis, EntityExtractor, LlmProvider};
use tidewatch_extractor::{DocumentAnalyzer, ExtractError, StubExtractor};
use tidewatch_llm::OpenAiProvider;

use crate::config::AppConfig;
use crate::error::CliError;

/// The configured extractor: canned stub or the live OpenAI pipeline.
pub enum AnyExtractor {
    /// Canned findings, no network use
    Stub(StubExtractor),
    /// LLM-backed extraction pipeline
    OpenAi(DocumentAnalyzer<OpenAiProvider>),
}

impl AnyExtractor {
    /// Build the extractor the configuration asks for.
    pub fn from_config(config: &AppConfig) -> Result<Self, CliError> {
        if config.stub_mode {
            tracing::info!("stub mode on, no provider calls will be made");
            return Ok(Self::Stub(StubExtractor::new()));
        }

        let api_key = config.openai_api_key.clone().unwrap_or_default();
        let mut provider =
            OpenAiProvider::new(api_key).map_err(|e| CliError::Config(e.to_string()))?;
        if let Some(model) = &config.model {
            provider = provider.with_model(model.clone());
        }

        tracing::info!(model = provider.model(), "live extraction pipeline configured");
        let analyzer = DocumentAnalyzer::new(provider, config.extractor.clone())
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(Self::OpenAi(analyzer))
    }
}

#[async_trait]
impl EntityExtractor for AnyExtractor {
    type Error = ExtractError;

    async fn extract_from_text(
        &self,
        text: &str,
        entities: &[String],
    ) -> Result<DocumentAnalysis, ExtractError> {
        match self {
            Self::Stub(stub) => stub.extract_from_text(text, entities).await,
            Self::OpenAi(analyzer) => analyzer.extract_from_text(text, entities).await,
        }
    }

    async fn extract_from_source(
        &self,
        source_url: &str,
        entities: &[String],
    ) -> Result<DocumentAnalysis, ExtractError> {
        match self {
            Self::Stub(stub) => stub.extract_from_source(source_url, entities).await,
            Self::OpenAi(analyzer) => analyzer.extract_from_source(source_url, entities).await,
        }
    }
}
