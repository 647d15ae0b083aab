//! Order data model.
//!
//! Orders arrive from the external order store already populated. The engine
//! reasons structurally only about `status`; everything else is carried
//! through to filters, sorts, and transcript templates as given.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lifecycle::OrderStatus;

/// Opaque unique order key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wraps a raw key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A line on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Item id.
    pub id: String,
    /// Product name.
    pub name: String,
    /// Stock keeping unit.
    pub sku: String,
    /// Ordered quantity (> 0).
    pub quantity: u32,
}

/// A delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique key.
    pub id: OrderId,
    /// Human-facing order number, e.g. `ORD-2024-001`.
    pub order_number: String,
    /// Customer name.
    pub customer: String,
    /// Delivery destination.
    pub destination: String,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Ordered lines.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Order value in euros. Accepted as given, never recomputed from items.
    pub total_value: f64,
    /// When the order was created.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Operator-facing notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Summary written by the automated agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

impl Order {
    /// Sum of item quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// `total_value` rendered as euros.
    #[must_use]
    pub fn formatted_value(&self) -> String {
        format_currency(self.total_value)
    }
}

/// Delivery facts the order store derives an intake status from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// The delivery failed outright.
    pub failure: bool,
    /// Quantity actually delivered.
    pub delivered_qty: u32,
    /// Quantity ordered.
    pub order_qty: u32,
}

impl DeliveryOutcome {
    /// Intake status for these facts.
    ///
    /// `ai_resolving` is never derived here; it is only ever asserted.
    #[must_use]
    pub fn derive_status(&self) -> OrderStatus {
        if self.failure {
            OrderStatus::SupportRequired
        } else if self.delivered_qty < self.order_qty {
            OrderStatus::ActionRequired
        } else {
            OrderStatus::Completed
        }
    }
}

/// Formats an amount as euros with thousands separators and at most three
/// fraction digits: `1500.0` → `€1,500`, `1234.5` → `€1,234.5`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let whole = rounded.trunc();
    let fraction = ((rounded - whole) * 1000.0).round() as u64;

    let digits = format!("{}", whole as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction == 0 {
        format!("{sign}€{grouped}")
    } else {
        let fraction = format!("{fraction:03}");
        format!("{sign}€{grouped}.{}", fraction.trim_end_matches('0'))
    }
}

/// `createdAt` accepts RFC 3339 as well as the naive ISO timestamps the
/// order store emits, which are taken to be UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}
