//! Order lifecycle states.
//!
//! Statuses are asserted from outside the engine (an operator action or an
//! upstream system) and simply overwrite `order.status`. The engine only needs
//! the fixed rank, presentation metadata, and the transcript branch per state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::TriageError;
use crate::order::{Order, OrderId};

/// Lifecycle state of an order.
///
/// Variants are declared in display-rank order, least resolved first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// A customer conversation was escalated to human support.
    SupportRequired,
    /// An operator has to pick a course of action.
    ActionRequired,
    /// The automated agent is working on the order.
    AiResolving,
    /// Nothing left to do.
    Completed,
}

impl OrderStatus {
    /// All statuses in tab order.
    pub const ALL: [Self; 4] =
        [Self::SupportRequired, Self::ActionRequired, Self::AiResolving, Self::Completed];

    /// Fixed display rank used by the status sort (ascending = least resolved first).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::SupportRequired => 0,
            Self::ActionRequired => 1,
            Self::AiResolving => 2,
            Self::Completed => 3,
        }
    }

    /// Wire name, as used by the order store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SupportRequired => "support_required",
            Self::ActionRequired => "action_required",
            Self::AiResolving => "ai_resolving",
            Self::Completed => "completed",
        }
    }

    /// Badge label shown next to an order.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SupportRequired => "Support Requested",
            Self::ActionRequired => "Action Required",
            Self::AiResolving => "Agentic Handling",
            Self::Completed => "Completed",
        }
    }

    /// Label of the filter tab for this status.
    #[must_use]
    pub const fn tab_label(self) -> &'static str {
        match self {
            Self::SupportRequired => "Support Requested",
            Self::ActionRequired => "Action Required",
            Self::AiResolving => "AI Agent Dispatched",
            Self::Completed => "Done",
        }
    }

    /// Semantic severity tag for presentation.
    #[must_use]
    pub const fn tone(self) -> StatusTone {
        match self {
            Self::SupportRequired => StatusTone::Critical,
            Self::ActionRequired => StatusTone::Warning,
            Self::AiResolving => StatusTone::Info,
            Self::Completed => StatusTone::Success,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| TriageError::InvalidStatus(s.to_string()))
    }
}

/// Severity tag attached to each status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    /// Needs a human now (orange).
    Critical,
    /// Needs a decision (amber).
    Warning,
    /// In progress (blue).
    Info,
    /// Done (emerald).
    Success,
}

impl StatusTone {
    /// Palette name the presentation layer maps to concrete colors.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Critical => "orange",
            Self::Warning => "amber",
            Self::Info => "blue",
            Self::Success => "emerald",
        }
    }
}

/// Record of an externally asserted status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// The order that changed.
    pub order_id: OrderId,
    /// Status before the assertion.
    pub from: OrderStatus,
    /// Status after the assertion.
    pub to: OrderStatus,
    /// When the assertion was applied.
    pub at: DateTime<Utc>,
}

impl StatusChange {
    /// Whether the assertion actually changed anything.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Applies externally asserted transitions.
///
/// Every state is terminal with respect to the engine, so no transition is
/// ever refused; the new status overwrites the old one.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderLifecycle;

impl OrderLifecycle {
    /// Overwrites `order.status` with `to` and reports what changed.
    pub fn assert_status(order: &mut Order, to: OrderStatus) -> StatusChange {
        let from = order.status;
        order.status = to;

        if from == to {
            debug!(order_id = %order.id, status = %to, "Status re-asserted");
        } else {
            info!(order_id = %order.id, from = %from, to = %to, "Status asserted");
        }

        StatusChange { order_id: order.id.clone(), from, to, at: Utc::now() }
    }
}
