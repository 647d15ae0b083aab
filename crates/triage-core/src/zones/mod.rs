//! Risk zone classification.
//!
//! Maps a continuous risk score onto one of three handling tiers using two
//! operator-configurable thresholds, and keeps those thresholds ordered.

pub mod classifier;
pub mod settings;
pub mod types;

pub use classifier::{bands, classify, update_thresholds};
pub use settings::{SaveAck, ThresholdSettings};
pub use types::{RiskScore, RiskZone, ThresholdConfig, ZoneBand};
