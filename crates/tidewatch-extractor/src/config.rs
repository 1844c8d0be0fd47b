//! Configuration for the extraction core

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`crate::DocumentAnalyzer`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum attempts for a retryable network failure
    pub max_retries: u32,

    /// Initial backoff delay after a retryable failure (milliseconds)
    pub initial_backoff_ms: u64,

    /// Cap on the doubled backoff delay (milliseconds)
    pub max_backoff_ms: u64,

    /// Character budget for a single provider request. Size accounting is a
    /// character-count approximation of the provider's token limit, so this
    /// is set conservatively below the real limit.
    pub chunk_char_budget: usize,

    /// When the sentence-level filter output still exceeds this many
    /// characters, the ultra filter is applied
    pub ultra_filter_threshold: usize,

    /// Fixed delay between sequential chunk requests (milliseconds),
    /// independent of the backoff-on-failure delay
    pub inter_chunk_delay_ms: u64,

    /// Wall-clock ceiling for one document's extraction (seconds)
    pub extraction_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Initial backoff as a Duration
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    /// Backoff cap as a Duration
    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }

    /// Inter-chunk delay as a Duration
    pub fn inter_chunk_delay(&self) -> Duration {
        Duration::from_millis(self.inter_chunk_delay_ms)
    }

    /// Per-document timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 {
            return Err("max_retries must be greater than 0".to_string());
        }
        if self.chunk_char_budget == 0 {
            return Err("chunk_char_budget must be greater than 0".to_string());
        }
        if self.initial_backoff_ms == 0 {
            return Err("initial_backoff_ms must be greater than 0".to_string());
        }
        if self.max_backoff_ms < self.initial_backoff_ms {
            return Err("max_backoff_ms cannot be below initial_backoff_ms".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 1_000,
            max_backoff_ms: 60_000,
            chunk_char_budget: 10_000,
            ultra_filter_threshold: 30_000,
            inter_chunk_delay_ms: 2_000,
            extraction_timeout_secs: 300,
        }
    }
}
