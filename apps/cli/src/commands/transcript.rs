//! Transcript command implementation.
//!
//! Renders the selected order's transcript, optionally after sending a
//! message and waiting for the counter-reply.

use chrono::Utc;
use colored::Colorize;
use serde_json::json;
use std::path::Path;
use triage_core::transcript::synthesize_with_status;
use triage_core::{ChatMessage, OpsConsole, OrderStore, TriageConfig};

use super::open_store;
use crate::colors;

/// Execute the transcript command.
pub async fn execute(
    config: &TriageConfig,
    file: &Path,
    key: &str,
    as_status: Option<&str>,
    say: Option<&str>,
    json_output: bool,
) -> anyhow::Result<()> {
    let store = open_store(file).await?;
    let order = store.get(key).await?;
    let mut console = OpsConsole::with_config(store.list_all().await?, config)?;
    console.select_order(order.id.as_str()).await?;

    let messages = if let Some(raw_status) = as_status {
        synthesize_with_status(&order, raw_status, Utc::now())
    } else {
        if let Some(text) = say {
            match console.send_message(text).await {
                Some(pending) => {
                    if !pending.delivered().await {
                        tracing::warn!(order_id = %order.id, "Counter-reply was not delivered");
                    }
                }
                None => tracing::warn!("Ignoring empty message"),
            }
        }
        console.transcript().await
    };

    if json_output {
        let output = json!({
            "id": order.id,
            "orderNumber": order.order_number,
            "status": as_status.unwrap_or(order.status.as_str()),
            "messages": messages,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!(
        "{} {} {}",
        format!("💬 {}", order.order_number).bold(),
        order.customer.dimmed(),
        colors::status_label(order.status)
    );
    if let Some(raw_status) = as_status {
        println!("{}", format!("Preview as '{raw_status}'").dimmed());
    }
    println!();
    for message in &messages {
        print_message(message);
    }
    Ok(())
}

fn print_message(message: &ChatMessage) {
    println!(
        "{} {}",
        message.timestamp.format("%H:%M").to_string().dimmed(),
        colors::sender_label(message.sender)
    );
    for line in message.lines() {
        println!("    {line}");
    }
    println!();
}
