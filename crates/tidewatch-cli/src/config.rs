//! Runtime configuration assembled from CLI settings.

use std::path::PathBuf;

use tidewatch_extractor::ExtractorConfig;
use tidewatch_processor::ProcessorConfig;

use crate::cli::Settings;
use crate::error::CliError;

/// Everything the commands need to wire up the pipeline.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Entities to look for in every document
    pub entities: Vec<String>,
    /// Use the stub extractor instead of a live provider
    pub stub_mode: bool,
    /// Spool directory for incoming .eml files
    pub spool_dir: PathBuf,
    /// Outbox directory for rendered reports
    pub outbox_dir: PathBuf,
    /// Provider API key, required when stub mode is off
    pub openai_api_key: Option<String>,
    /// Optional model override
    pub model: Option<String>,
    /// Orchestrator settings
    pub processor: ProcessorConfig,
    /// Extraction pipeline settings
    pub extractor: ExtractorConfig,
}

impl AppConfig {
    /// Build and validate the configuration from parsed settings.
    pub fn from_settings(settings: Settings) -> Result<Self, CliError> {
        let entities: Vec<String> = settings
            .entities
            .into_iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();

        if entities.is_empty() {
            return Err(CliError::Config(
                "no entities configured; set --entities or TIDEWATCH_ENTITIES".to_string(),
            ));
        }

        if !settings.stub_mode && settings.openai_api_key.as_deref().unwrap_or("").is_empty() {
            return Err(CliError::Config(
                "stub mode is off but no API key is set; set OPENAI_API_KEY".to_string(),
            ));
        }

        let processor = ProcessorConfig {
            entities: entities.clone(),
            max_attempts: settings.max_attempts,
            attempt_delay_secs: settings.attempt_delay_secs,
            scan_interval_secs: settings.scan_interval_secs,
        };
        processor.validate().map_err(|e| CliError::Config(e.to_string()))?;

        let extractor = ExtractorConfig::default();

        Ok(Self {
            entities,
            stub_mode: settings.stub_mode,
            spool_dir: settings.spool_dir,
            outbox_dir: settings.outbox_dir,
            openai_api_key: settings.openai_api_key,
            model: settings.model,
            processor,
            extractor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Built directly rather than parsed, so the ambient environment
    // (OPENAI_API_KEY etc.) cannot leak into the assertions.
    fn settings(entities: &[&str]) -> Settings {
        Settings {
            entities: entities.iter().map(|e| e.to_string()).collect(),
            stub_mode: true,
            spool_dir: PathBuf::from("spool"),
            outbox_dir: PathBuf::from("outbox"),
            openai_api_key: None,
            model: None,
            max_attempts: 3,
            attempt_delay_secs: 300,
            scan_interval_secs: 3600,
        }
    }

    #[test]
    fn test_entities_are_trimmed() {
        let config =
            AppConfig::from_settings(settings(&[" Danske Bank ", " Acme ApS ", ""])).unwrap();
        assert_eq!(
            config.entities,
            vec!["Danske Bank".to_string(), "Acme ApS".to_string()]
        );
    }

    #[test]
    fn test_no_entities_is_rejected() {
        assert!(AppConfig::from_settings(settings(&[])).is_err());
    }

    #[test]
    fn test_live_mode_requires_api_key() {
        let mut settings = settings(&["Danske Bank"]);
        settings.stub_mode = false;

        let result = AppConfig::from_settings(settings);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_live_mode_with_key_is_accepted() {
        let mut settings = settings(&["Danske Bank"]);
        settings.stub_mode = false;
        settings.openai_api_key = Some("sk-test".to_string());

        let config = AppConfig::from_settings(settings).unwrap();
        assert!(!config.stub_mode);
    }
}
