//! Shared fixtures for triage-core integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use triage_core::{Order, OrderId, OrderItem, OrderStatus};

/// Fixed creation time used by every fixture order.
pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 8, 15, 0).unwrap()
}

/// Builds an order with predictable fields derived from `id`.
pub fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: OrderId::new(id),
        order_number: format!("ORD-2024-{id:0>3}"),
        customer: format!("Customer {id}"),
        destination: "Tampere".to_string(),
        status,
        items: vec![OrderItem {
            id: format!("{id}-1"),
            name: "Frozen Berries 2kg".to_string(),
            sku: "VAL-BER-002".to_string(),
            quantity: 12,
        }],
        total_value: 1500.0,
        created_at: created_at(),
        notes: None,
        ai_summary: None,
    }
}

/// Two support_required orders interleaved with three others.
pub fn mixed_orders() -> Vec<Order> {
    vec![
        order("1", OrderStatus::Completed),
        order("2", OrderStatus::SupportRequired),
        order("3", OrderStatus::AiResolving),
        order("4", OrderStatus::SupportRequired),
        order("5", OrderStatus::ActionRequired),
    ]
}

/// Ids of `orders`, in order.
pub fn ids(orders: &[Order]) -> Vec<String> {
    orders.iter().map(|order| order.id.to_string()).collect()
}
