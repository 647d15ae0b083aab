//! Types for risk zone classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of every threshold and score, in percent.
pub const MAX_PERCENT: u8 = 100;

/// Default boundary between no-action and manual review.
pub const DEFAULT_MANUAL_THRESHOLD: u8 = 65;

/// Default boundary between manual review and agentic handling.
pub const DEFAULT_AGENT_THRESHOLD: u8 = 85;

/// Handling tier derived from a risk score. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskZone {
    /// Low risk: nothing to do.
    NoAction,
    /// Medium risk: a human reviews the order.
    ManualReview,
    /// Highest risk: an agent is dispatched.
    AgenticHandling,
}

impl RiskZone {
    /// All zones from lowest to highest risk.
    pub const ALL: [Self; 3] = [Self::NoAction, Self::ManualReview, Self::AgenticHandling];

    /// Handling label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoAction => "No action",
            Self::ManualReview => "Manual review",
            Self::AgenticHandling => "Agentic handling",
        }
    }

    /// Risk level qualifier shown next to the label.
    #[must_use]
    pub const fn risk_level(self) -> &'static str {
        match self {
            Self::NoAction => "Low Risk",
            Self::ManualReview => "Medium Risk",
            Self::AgenticHandling => "Highest Risk",
        }
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoAction => "no_action",
            Self::ManualReview => "manual_review",
            Self::AgenticHandling => "agentic_handling",
        }
    }
}

impl fmt::Display for RiskZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator-configurable zone boundaries.
///
/// Always satisfies `manual < agent`, both within `0..=100`. The only way to
/// build one is through the auto-repair in [`ThresholdConfig::repaired`], so
/// the invariant cannot be bypassed, including through deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ThresholdInput")]
pub struct ThresholdConfig {
    manual: u8,
    agent: u8,
}

/// Unchecked threshold pair as it appears on the wire.
#[derive(Debug, Clone, Copy, Deserialize)]
struct ThresholdInput {
    manual: u8,
    agent: u8,
}

impl From<ThresholdInput> for ThresholdConfig {
    fn from(input: ThresholdInput) -> Self {
        Self::repaired(input.manual, input.agent)
    }
}

impl ThresholdConfig {
    /// Builds a config from proposed values, repairing the ordering.
    ///
    /// Both values are clamped to `0..=100`. The agent threshold is honored
    /// (floored at 1 so a lower zone can exist); if the manual threshold does
    /// not sit strictly below it, manual becomes `agent - 1`.
    #[must_use]
    pub fn repaired(proposed_manual: u8, proposed_agent: u8) -> Self {
        let agent = proposed_agent.clamp(1, MAX_PERCENT);
        let manual = proposed_manual.min(MAX_PERCENT);
        let manual = if manual >= agent { agent - 1 } else { manual };
        Self { manual, agent }
    }

    /// Inclusive lower bound of manual review.
    #[must_use]
    pub const fn manual(&self) -> u8 {
        self.manual
    }

    /// Inclusive lower bound of agentic handling.
    #[must_use]
    pub const fn agent(&self) -> u8 {
        self.agent
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self { manual: DEFAULT_MANUAL_THRESHOLD, agent: DEFAULT_AGENT_THRESHOLD }
    }
}

/// A risk score on the 0-100 percent scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskScore(f64);

impl RiskScore {
    /// Wraps a percentage.
    #[must_use]
    pub const fn from_percent(percent: f64) -> Self {
        Self(percent)
    }

    /// Converts a failure probability (`0.0..=1.0`) from the prediction
    /// service into a percentage score.
    #[must_use]
    pub fn from_failure_probability(probability: f64) -> Self {
        Self(probability.clamp(0.0, 1.0) * 100.0)
    }

    /// The score in percent.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// The score interval one zone covers under a given config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneBand {
    /// The zone.
    pub zone: RiskZone,
    /// Inclusive lower bound.
    pub lower: u8,
    /// Exclusive upper bound; `None` runs through 100.
    pub upper: Option<u8>,
}

impl ZoneBand {
    /// True when no integer score falls in the band.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.upper.is_some_and(|upper| upper <= self.lower)
    }

    /// One-line human description, e.g. `Risk ≥ 85%: Agentic handling (Highest Risk)`.
    #[must_use]
    pub fn describe(&self) -> String {
        let range = match (self.zone, self.upper) {
            (_, None) => format!("Risk ≥ {}%", self.lower),
            (RiskZone::NoAction, Some(upper)) => format!("Risk < {upper}%"),
            (_, Some(upper)) => format!("Risk {}% - {}%", self.lower, upper.saturating_sub(1)),
        };
        format!("{range}: {} ({})", self.zone.label(), self.zone.risk_level())
    }
}
