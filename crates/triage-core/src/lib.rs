//! Risk triage and order lifecycle engine for the operations console.
//!
//! Maps risk scores onto handling tiers under operator-configurable
//! thresholds, carries order lifecycle status, synthesizes the per-order
//! communication transcript, and produces the filtered, sorted order view.

pub mod config;
pub mod console;
pub mod error;
pub mod lifecycle;
pub mod order;
pub mod query;
pub mod store;
pub mod transcript;
pub mod zones;

pub use config::{ConfigError, TriageConfig, TriageConfigLoader};
pub use console::OpsConsole;
pub use error::{Result, TriageError};
pub use lifecycle::{OrderLifecycle, OrderStatus, StatusChange, StatusTone};
pub use order::{DeliveryOutcome, Order, OrderId, OrderItem, format_currency};
pub use query::{
    SortColumn, SortDirection, SortState, StatusFilter, TabCounts, count_by_status, status_counts,
    view,
};
pub use store::{InMemoryOrderStore, OrderStore, PageQuery};
pub use transcript::{ChatMessage, PendingReply, Sender, TranscriptSession, synthesize};
pub use zones::{
    RiskScore, RiskZone, SaveAck, ThresholdConfig, ThresholdSettings, ZoneBand, bands, classify,
    update_thresholds,
};
