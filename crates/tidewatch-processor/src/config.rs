//! Processing configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ProcessError;

/// Configuration for the processing orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Entities to look for in every analyzed document
    pub entities: Vec<String>,

    /// Outer attempts for a whole processing run (default: 3)
    pub max_attempts: u32,

    /// Fixed delay between outer attempts in seconds (default: 300)
    pub attempt_delay_secs: u64,

    /// Mailbox scan interval for the background worker in seconds
    /// (default: 3600)
    pub scan_interval_secs: u64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            max_attempts: 3,
            attempt_delay_secs: 300,
            scan_interval_secs: 3600,
        }
    }
}

impl ProcessorConfig {
    /// Delay between outer attempts.
    pub fn attempt_delay(&self) -> Duration {
        Duration::from_secs(self.attempt_delay_secs)
    }

    /// Mailbox scan interval.
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ProcessError> {
        if self.entities.is_empty() {
            return Err(ProcessError::Config("entities must not be empty".to_string()));
        }
        if self.entities.iter().any(|e| e.trim().is_empty()) {
            return Err(ProcessError::Config("entities must not contain blank names".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(ProcessError::Config("max_attempts must be at least 1".to_string()));
        }
        if self.scan_interval_secs == 0 {
            return Err(ProcessError::Config("scan_interval_secs must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ProcessorConfig {
        ProcessorConfig {
            entities: vec!["Danske Bank".to_string()],
            ..ProcessorConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_entities_rejected() {
        let config = ProcessorConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_entity_rejected() {
        let config = ProcessorConfig {
            entities: vec!["Danske Bank".to_string(), "   ".to_string()],
            ..ProcessorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = ProcessorConfig {
            max_attempts: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }
}
