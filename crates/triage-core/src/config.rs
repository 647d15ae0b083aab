//! TOML configuration for the console.
//!
//! Every section and key is optional. Thresholds read from a file go through
//! the same auto-repair as interactive updates, so a loaded config always
//! satisfies `manual < agent`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::query::{SortColumn, SortDirection, SortState, StatusFilter};
use crate::zones::types::{DEFAULT_AGENT_THRESHOLD, DEFAULT_MANUAL_THRESHOLD, MAX_PERCENT};
use crate::zones::ThresholdConfig;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading the file.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error.
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Console configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Zone thresholds.
    pub thresholds: ThresholdSection,
    /// Transcript behaviour.
    pub transcript: TranscriptSection,
    /// Initial order view.
    pub view: ViewSection,
}

/// `[thresholds]`, percentages in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSection {
    /// Lower bound of manual review.
    pub manual: u32,
    /// Lower bound of agentic handling.
    pub agent: u32,
}

impl Default for ThresholdSection {
    fn default() -> Self {
        Self { manual: u32::from(DEFAULT_MANUAL_THRESHOLD), agent: u32::from(DEFAULT_AGENT_THRESHOLD) }
    }
}

/// `[transcript]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSection {
    /// Delay before the counter-reply, in milliseconds.
    pub reply_delay_ms: u64,
}

impl Default for TranscriptSection {
    fn default() -> Self {
        Self { reply_delay_ms: 1000 }
    }
}

/// `[view]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSection {
    /// `all` or a status name.
    pub filter: String,
    /// Initially sorted column; unsorted when absent.
    pub sort_column: Option<String>,
    /// `asc`, `desc` or `none`.
    pub sort_direction: String,
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            filter: "all".to_string(),
            sort_column: Some(SortColumn::Status.as_str().to_string()),
            sort_direction: SortDirection::Asc.as_str().to_string(),
        }
    }
}

impl TriageConfig {
    /// Threshold configuration, auto-repaired.
    #[must_use]
    pub fn threshold_config(&self) -> ThresholdConfig {
        let clamp = |value: u32| u8::try_from(value).unwrap_or(MAX_PERCENT).min(MAX_PERCENT);
        let manual = clamp(self.thresholds.manual);
        let agent = clamp(self.thresholds.agent);
        let config = ThresholdConfig::repaired(manual, agent);
        if (config.manual(), config.agent()) != (manual, agent) {
            warn!(
                manual,
                agent,
                repaired_manual = config.manual(),
                repaired_agent = config.agent(),
                "Configured thresholds were out of order and have been repaired"
            );
        }
        config
    }

    /// Counter-reply delay.
    #[must_use]
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.transcript.reply_delay_ms)
    }

    /// Initial status filter.
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` for an unknown filter.
    pub fn status_filter(&self) -> Result<StatusFilter> {
        self.view
            .filter
            .parse()
            .map_err(|err| ConfigError::Validation(format!("view.filter: {err}")))
    }

    /// Initial sort state.
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` for an unknown column or direction.
    pub fn sort_state(&self) -> Result<SortState> {
        let direction: SortDirection = self
            .view
            .sort_direction
            .parse()
            .map_err(|err| ConfigError::Validation(format!("view.sort_direction: {err}")))?;
        match &self.view.sort_column {
            None => Ok(SortState::unsorted()),
            Some(column) => {
                let column: SortColumn = column
                    .parse()
                    .map_err(|err| ConfigError::Validation(format!("view.sort_column: {err}")))?;
                Ok(SortState::new(column, direction))
            }
        }
    }
}

/// Configuration loader for console settings.
pub struct TriageConfigLoader;

impl TriageConfigLoader {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<TriageConfig> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    /// Returns error if the document cannot be parsed or validated.
    pub fn from_toml(content: &str) -> Result<TriageConfig> {
        let config: TriageConfig = toml::from_str(content)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns error if configuration is invalid.
    pub fn validate(config: &TriageConfig) -> Result<()> {
        let max = u32::from(MAX_PERCENT);
        for (name, value) in [("manual", config.thresholds.manual), ("agent", config.thresholds.agent)] {
            if value > max {
                return Err(ConfigError::Validation(format!(
                    "Invalid {name} threshold: {value}. Must be between 0 and {max}"
                )));
            }
        }

        config.status_filter()?;
        config.sort_state()?;
        Ok(())
    }
}
