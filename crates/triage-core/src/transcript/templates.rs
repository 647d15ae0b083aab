//! Status-keyed transcript templates.
//!
//! Each status has a fixed narrative. Slot timestamps are `created_at` plus a
//! fixed minute offset, so a transcript is fully determined by its order.

use chrono::{DateTime, TimeDelta, Utc};

use super::message::{ChatMessage, Sender};
use crate::lifecycle::OrderStatus;
use crate::order::Order;

/// Fallback for `action_required` orders without notes.
pub const ACTION_PROMPT_FALLBACK: &str = "This order requires your attention and decision.";

/// Fallback for `ai_resolving` orders without an agent summary.
pub const AI_SUMMARY_FALLBACK: &str = "Working on resolving the issue...";

/// The four recommended actions offered on `action_required` orders.
pub const RECOMMENDED_ACTIONS: &str = "📋 Recommended Actions:\n\n\
1. Contact customer via agent\n\
2. Contact customer personally\n\
3. Wait for inventory update\n\
4. Cancel and refund\n\n\
Please select your preferred course of action.";

/// Content of the transcript for an unrecognized status.
pub const SESSION_STARTED: &str = "Chat session started for this order.";

/// Minute offsets per template slot.
pub const SUPPORT_REQUIRED_OFFSETS: [i64; 5] = [5, 6, 8, 10, 11];
/// Minute offsets per template slot.
pub const ACTION_REQUIRED_OFFSETS: [i64; 3] = [5, 6, 7];
/// Minute offsets per template slot.
pub const AI_RESOLVING_OFFSETS: [i64; 7] = [5, 6, 8, 10, 12, 13, 20];
/// Minute offsets per template slot.
pub const COMPLETED_OFFSETS: [i64; 7] = [5, 6, 15, 45, 90, 120, 125];

/// Builds the transcript for `order` from its current status.
#[must_use]
pub fn synthesize(order: &Order) -> Vec<ChatMessage> {
    match order.status {
        OrderStatus::SupportRequired => support_required(order),
        OrderStatus::ActionRequired => action_required(order),
        OrderStatus::AiResolving => ai_resolving(order),
        OrderStatus::Completed => completed(order),
    }
}

/// Builds the transcript `order` would have under `raw_status`.
///
/// An unrecognized status yields the single session-started notice at `now`.
#[must_use]
pub fn synthesize_with_status(order: &Order, raw_status: &str, now: DateTime<Utc>) -> Vec<ChatMessage> {
    match raw_status.parse::<OrderStatus>() {
        Ok(status) => {
            let mut preview = order.clone();
            preview.status = status;
            synthesize(&preview)
        }
        Err(_) => session_started(now),
    }
}

/// The transcript shown when no status-specific narrative applies.
#[must_use]
pub fn session_started(now: DateTime<Utc>) -> Vec<ChatMessage> {
    vec![ChatMessage::new("1", Sender::System, SESSION_STARTED, now)]
}

/// Canned counter-reply to an operator message, keyed by status.
///
/// `None` (no recognized status) and `support_required` share the generic reply.
#[must_use]
pub fn counter_reply(status: Option<OrderStatus>) -> &'static str {
    match status {
        Some(OrderStatus::ActionRequired) => {
            "Thank you for your decision. I'll process this action immediately."
        }
        Some(OrderStatus::AiResolving) => {
            "The agentic system is currently handling this. I'll monitor the progress and update you shortly."
        }
        Some(OrderStatus::Completed) => {
            "This order has been completed. Is there anything else I can help you with?"
        }
        Some(OrderStatus::SupportRequired) | None => {
            "I understand your concern. Let me check the order details and get back to you with a solution."
        }
    }
}

/// Zips template slots with their offsets into numbered messages.
fn build(created_at: DateTime<Utc>, offsets: &[i64], slots: Vec<(Sender, String)>) -> Vec<ChatMessage> {
    debug_assert_eq!(offsets.len(), slots.len());
    offsets
        .iter()
        .zip(slots)
        .enumerate()
        .map(|(idx, (minutes, (sender, content)))| {
            ChatMessage::new(
                (idx + 1).to_string(),
                sender,
                content,
                created_at + TimeDelta::minutes(*minutes),
            )
        })
        .collect()
}

fn support_required(order: &Order) -> Vec<ChatMessage> {
    build(
        order.created_at,
        &SUPPORT_REQUIRED_OFFSETS,
        vec![
            (
                Sender::Customer,
                format!(
                    "Hi, I need help with order {}. The shipping address seems incorrect.",
                    order.order_number
                ),
            ),
            (
                Sender::Ai,
                "Thank you for reaching out. I can see the address validation has failed. Let me verify the details with you."
                    .to_string(),
            ),
            (
                Sender::Customer,
                "The correct address should be in Helsinki, but the system shows something else."
                    .to_string(),
            ),
            (
                Sender::Ai,
                "I understand. Unfortunately, this requires manual verification from our operations team due to security protocols. I've escalated this to human support."
                    .to_string(),
            ),
            (
                Sender::System,
                "⚠️ Support requested - Awaiting operations manager review".to_string(),
            ),
        ],
    )
}

fn action_required(order: &Order) -> Vec<ChatMessage> {
    let prompt = order
        .notes
        .as_deref()
        .filter(|notes| !notes.is_empty())
        .unwrap_or(ACTION_PROMPT_FALLBACK);

    build(
        order.created_at,
        &ACTION_REQUIRED_OFFSETS,
        vec![
            (Sender::System, format!("Action Required for {}", order.order_number)),
            (Sender::Ai, prompt.to_string()),
            (Sender::System, RECOMMENDED_ACTIONS.to_string()),
        ],
    )
}

fn ai_resolving(order: &Order) -> Vec<ChatMessage> {
    let summary = order
        .ai_summary
        .as_deref()
        .filter(|summary| !summary.is_empty())
        .unwrap_or(AI_SUMMARY_FALLBACK);

    build(
        order.created_at,
        &AI_RESOLVING_OFFSETS,
        vec![
            (Sender::System, format!("🤖 Agentic Handling initiated for {}", order.order_number)),
            (Sender::Ai, "💭 Analyzing order details and identifying issues...".to_string()),
            (Sender::Ai, summary.to_string()),
            (
                Sender::Ai,
                format!("💭 Checking alternative delivery options for {}...", order.destination),
            ),
            (Sender::System, "📧 Automated message sent to customer".to_string()),
            (
                Sender::Ai,
                format!(
                    "Dear {},\n\nWe're working on your order {}. We've identified some scheduling adjustments needed and are currently finding the best solution for you. We'll keep you updated.\n\nBest regards,\nDelivery Operations",
                    order.customer, order.order_number
                ),
            ),
            (
                Sender::Ai,
                "💭 Finalizing resolution strategy... Expected completion in 15 minutes.".to_string(),
            ),
        ],
    )
}

fn completed(order: &Order) -> Vec<ChatMessage> {
    build(
        order.created_at,
        &COMPLETED_OFFSETS,
        vec![
            (Sender::System, format!("Order {} - Resolution Timeline", order.order_number)),
            (Sender::Ai, "✓ Order received and validated".to_string()),
            (Sender::Ai, format!("✓ Delivery route to {} optimized", order.destination)),
            (Sender::Ai, "✓ Inventory allocated and packed".to_string()),
            (Sender::Ai, "✓ Shipment dispatched to carrier".to_string()),
            (Sender::System, "📧 Delivery confirmation sent to customer".to_string()),
            (
                Sender::Ai,
                format!(
                    "✅ Order completed successfully. Total value: {}",
                    order.formatted_value()
                ),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::test_support::sample_order;

    fn offsets(messages: &[ChatMessage], order: &Order) -> Vec<i64> {
        messages.iter().map(|m| (m.timestamp - order.created_at).num_minutes()).collect()
    }

    #[test]
    fn test_support_required_template() {
        let order = sample_order("1", OrderStatus::SupportRequired);
        let messages = synthesize(&order);

        assert_eq!(messages.len(), 5);
        assert_eq!(offsets(&messages, &order), SUPPORT_REQUIRED_OFFSETS);
        assert!(messages[0].content.contains("ORD-2024-001"));
        assert_eq!(
            messages.iter().map(|m| m.sender).collect::<Vec<_>>(),
            vec![Sender::Customer, Sender::Ai, Sender::Customer, Sender::Ai, Sender::System]
        );
        assert!(messages[4].content.contains("Awaiting operations manager review"));
    }

    #[test]
    fn test_action_required_uses_notes() {
        let mut order = sample_order("2", OrderStatus::ActionRequired);
        order.notes = Some("Only 8 of 24 units in stock.".to_string());
        let messages = synthesize(&order);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, "Action Required for ORD-2024-002");
        assert_eq!(messages[1].content, "Only 8 of 24 units in stock.");
        assert_eq!(messages[1].sender, Sender::Ai);
        assert_eq!(messages[2].content, RECOMMENDED_ACTIONS);
        assert_eq!(offsets(&messages, &order), ACTION_REQUIRED_OFFSETS);
    }

    #[test]
    fn test_action_required_fallback_prompt() {
        let order = sample_order("2", OrderStatus::ActionRequired);
        let messages = synthesize(&order);
        assert_eq!(messages[1].content, ACTION_PROMPT_FALLBACK);
        assert_eq!(messages[2].lines().filter(|l| l.starts_with(char::is_numeric)).count(), 4);
    }

    #[test]
    fn test_ai_resolving_template() {
        let mut order = sample_order("3", OrderStatus::AiResolving);
        order.customer = "Kesko Oyj".to_string();
        let messages = synthesize(&order);

        assert_eq!(messages.len(), 7);
        assert_eq!(offsets(&messages, &order), AI_RESOLVING_OFFSETS);
        assert_eq!(messages[2].content, AI_SUMMARY_FALLBACK);
        assert!(messages[3].content.contains("Helsinki"));
        assert_eq!(messages[4].sender, Sender::System);
        assert!(messages[5].content.starts_with("Dear Kesko Oyj,\n\n"));
        assert!(messages[5].content.contains("ORD-2024-003"));

        order.ai_summary = Some("Rerouting via Tampere hub.".to_string());
        assert_eq!(synthesize(&order)[2].content, "Rerouting via Tampere hub.");
    }

    #[test]
    fn test_completed_template() {
        let order = sample_order("4", OrderStatus::Completed);
        let messages = synthesize(&order);

        assert_eq!(messages.len(), 7);
        assert_eq!(offsets(&messages, &order), COMPLETED_OFFSETS);
        assert_eq!(messages[2].content, "✓ Delivery route to Helsinki optimized");
        let last = messages.last().unwrap();
        assert_eq!(last.content, "✅ Order completed successfully. Total value: €1,500");
        assert_eq!(last.timestamp, order.created_at + TimeDelta::minutes(125));
    }

    #[test]
    fn test_ids_are_slot_numbers() {
        let order = sample_order("5", OrderStatus::Completed);
        let ids: Vec<_> = synthesize(&order).into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        let order = sample_order("6", OrderStatus::AiResolving);
        assert_eq!(synthesize(&order), synthesize(&order));
    }

    #[test]
    fn test_synthesize_with_unrecognized_status() {
        let order = sample_order("7", OrderStatus::Completed);
        let now = Utc::now();

        let messages = synthesize_with_status(&order, "on_hold", now);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::System);
        assert_eq!(messages[0].content, SESSION_STARTED);
        assert_eq!(messages[0].timestamp, now);

        let preview = synthesize_with_status(&order, "action_required", now);
        assert_eq!(preview.len(), 3);
    }

    #[test]
    fn test_counter_replies() {
        assert!(counter_reply(Some(OrderStatus::AiResolving)).starts_with("The agentic system"));
        assert!(counter_reply(Some(OrderStatus::ActionRequired)).starts_with("Thank you for your decision"));
        assert!(counter_reply(Some(OrderStatus::Completed)).starts_with("This order has been completed"));
        assert_eq!(counter_reply(Some(OrderStatus::SupportRequired)), counter_reply(None));
    }
}
