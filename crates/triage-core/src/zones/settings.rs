//! Live threshold settings with an in-memory save acknowledgement.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::classifier::{bands, update_thresholds};
use super::types::{ThresholdConfig, ZoneBand};

/// How long a "saved" notice stays up after an acknowledgement.
pub const SAVED_NOTICE_DURATION: TimeDelta = TimeDelta::seconds(2);

/// Acknowledgement that a configuration was saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAck {
    /// The configuration that was acknowledged.
    pub config: ThresholdConfig,
    /// When it was acknowledged.
    pub saved_at: DateTime<Utc>,
}

/// Threshold configuration held by one console session.
///
/// Not persisted: saving only records an acknowledgement.
#[derive(Debug, Clone, Default)]
pub struct ThresholdSettings {
    current: ThresholdConfig,
    last_ack: Option<SaveAck>,
}

impl ThresholdSettings {
    /// Starts from `config`, unsaved.
    #[must_use]
    pub fn new(config: ThresholdConfig) -> Self {
        Self { current: config, last_ack: None }
    }

    /// The live configuration.
    #[must_use]
    pub fn current(&self) -> ThresholdConfig {
        self.current
    }

    /// Applies a proposal with auto-repair and returns the resulting config.
    pub fn update(&mut self, proposed_manual: u8, proposed_agent: u8) -> ThresholdConfig {
        self.current = update_thresholds(&self.current, proposed_manual, proposed_agent);
        self.current
    }

    /// Acknowledges the live configuration as saved.
    pub fn save(&mut self) -> SaveAck {
        let ack = SaveAck { config: self.current, saved_at: Utc::now() };
        info!(manual = ack.config.manual(), agent = ack.config.agent(), "Thresholds saved");
        self.last_ack = Some(ack);
        ack
    }

    /// Whether the live configuration equals the last acknowledged one.
    ///
    /// Stays `true` until the configuration changes. The transient notice is
    /// [`Self::saved_notice_at`].
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.last_ack.is_some_and(|ack| ack.config == self.current)
    }

    /// Whether a "saved" notice should still be showing at `now`: the live
    /// configuration is saved and was acknowledged less than
    /// [`SAVED_NOTICE_DURATION`] ago.
    #[must_use]
    pub fn saved_notice_at(&self, now: DateTime<Utc>) -> bool {
        self.last_ack.is_some_and(|ack| {
            ack.config == self.current && now.signed_duration_since(ack.saved_at) < SAVED_NOTICE_DURATION
        })
    }

    /// The most recent acknowledgement, if any.
    #[must_use]
    pub fn last_ack(&self) -> Option<SaveAck> {
        self.last_ack
    }

    /// Score bands for the live configuration.
    #[must_use]
    pub fn bands(&self) -> [ZoneBand; 3] {
        bands(&self.current)
    }
}
