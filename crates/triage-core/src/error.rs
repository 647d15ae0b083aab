// Error types for the triage engine boundaries

use thiserror::Error;

use crate::config::ConfigError;

/// Result type for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Triage errors.
///
/// The engine itself is total over well-formed input; these only surface
/// from configuration loading and the order-store boundary.
#[derive(Debug, Error)]
pub enum TriageError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No order matched the given id or order number
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Unknown status name
    #[error("Invalid order status: '{0}'. Valid options: support_required, action_required, ai_resolving, completed")]
    InvalidStatus(String),

    /// Unparseable sort specification
    #[error("Invalid sort specification: {0}")]
    InvalidSort(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
