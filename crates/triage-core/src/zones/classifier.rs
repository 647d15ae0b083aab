//! Risk zone classification and threshold updates.

use tracing::{debug, warn};

use super::types::{RiskScore, RiskZone, ThresholdConfig, ZoneBand};

/// Maps a score to its handling tier.
///
/// Each threshold is the inclusive lower bound of the zone above it:
/// `score < manual` is no action, `manual <= score < agent` is manual review,
/// `score >= agent` is agentic handling. A NaN score is not risky enough for
/// either threshold and lands in no action.
#[must_use]
pub fn classify(score: f64, config: &ThresholdConfig) -> RiskZone {
    if score >= f64::from(config.agent()) {
        RiskZone::AgenticHandling
    } else if score >= f64::from(config.manual()) {
        RiskZone::ManualReview
    } else {
        RiskZone::NoAction
    }
}

/// Applies a proposed threshold pair to `config`.
///
/// Never fails. When the proposal violates `manual < agent` the agent value
/// is honored and manual is pulled down to `agent - 1`.
#[must_use]
pub fn update_thresholds(
    config: &ThresholdConfig,
    proposed_manual: u8,
    proposed_agent: u8,
) -> ThresholdConfig {
    let updated = ThresholdConfig::repaired(proposed_manual, proposed_agent);

    if updated.manual() != proposed_manual || updated.agent() != proposed_agent {
        warn!(
            proposed_manual,
            proposed_agent,
            manual = updated.manual(),
            agent = updated.agent(),
            "Threshold proposal repaired"
        );
    }

    debug!(
        from_manual = config.manual(),
        from_agent = config.agent(),
        to_manual = updated.manual(),
        to_agent = updated.agent(),
        "Thresholds updated"
    );

    updated
}

/// The three score bands under `config`, lowest risk first.
#[must_use]
pub fn bands(config: &ThresholdConfig) -> [ZoneBand; 3] {
    [
        ZoneBand { zone: RiskZone::NoAction, lower: 0, upper: Some(config.manual()) },
        ZoneBand {
            zone: RiskZone::ManualReview,
            lower: config.manual(),
            upper: Some(config.agent()),
        },
        ZoneBand { zone: RiskZone::AgenticHandling, lower: config.agent(), upper: None },
    ]
}

impl RiskScore {
    /// Zone of this score under `config`.
    #[must_use]
    pub fn zone(self, config: &ThresholdConfig) -> RiskZone {
        classify(self.value(), config)
    }
}
