//! Status filter for the order view.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TriageError;
use crate::lifecycle::OrderStatus;
use crate::order::Order;

/// Either every order or the orders in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// No filtering.
    #[default]
    All,
    /// Only orders in this status.
    Status(OrderStatus),
}

impl StatusFilter {
    /// Filters in tab order, `All` first.
    pub const TABS: [Self; 5] = [
        Self::All,
        Self::Status(OrderStatus::SupportRequired),
        Self::Status(OrderStatus::ActionRequired),
        Self::Status(OrderStatus::AiResolving),
        Self::Status(OrderStatus::Completed),
    ];

    /// Whether `order` passes the filter.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => order.status == *status,
        }
    }

    /// Tab label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Status(status) => status.tab_label(),
        }
    }

    /// Wire name: `all` or the status name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Status(status) => status.as_str(),
        }
    }
}

impl From<OrderStatus> for StatusFilter {
    fn from(status: OrderStatus) -> Self {
        Self::Status(status)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Status)
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::test_support::sample_order;

    #[test]
    fn test_parse_filters() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "ai_resolving".parse::<StatusFilter>().unwrap(),
            StatusFilter::Status(OrderStatus::AiResolving)
        );
        assert!(matches!("shipped".parse::<StatusFilter>(), Err(TriageError::InvalidStatus(_))));
    }

    #[test]
    fn test_matches() {
        let order = sample_order("1", OrderStatus::ActionRequired);
        assert!(StatusFilter::All.matches(&order));
        assert!(StatusFilter::from(OrderStatus::ActionRequired).matches(&order));
        assert!(!StatusFilter::from(OrderStatus::Completed).matches(&order));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&StatusFilter::Status(OrderStatus::Completed)).unwrap();
        assert_eq!(json, "\"completed\"");
        let filter: StatusFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(filter, StatusFilter::All);
    }

    #[test]
    fn test_tab_labels() {
        let labels: Vec<_> = StatusFilter::TABS.iter().map(StatusFilter::label).collect();
        assert_eq!(
            labels,
            vec!["All", "Support Requested", "Action Required", "AI Agent Dispatched", "Done"]
        );
    }
}
