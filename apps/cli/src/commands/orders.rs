//! Orders command implementation.
//!
//! Prints the filtered, sorted order view.

use colored::Colorize;
use serde_json::json;
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};
use triage_core::{OpsConsole, Order, SortState, StatusFilter, TriageConfig};

use super::load_orders;
use crate::colors;

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Order #")]
    order_number: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Items")]
    items: u64,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            order_number: order.order_number.clone(),
            customer: order.customer.clone(),
            destination: order.destination.clone(),
            status: order.status.label().to_string(),
            items: order.total_quantity(),
            value: order.formatted_value(),
            created: order.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute the orders command.
pub async fn execute(
    config: &TriageConfig,
    file: &Path,
    filter: Option<&str>,
    sort: Option<&str>,
    json_output: bool,
) -> anyhow::Result<()> {
    let orders = load_orders(file).await?;
    let mut console = OpsConsole::with_config(orders, config)?;

    if let Some(filter) = filter {
        console.set_filter(filter.parse::<StatusFilter>()?);
    }
    if let Some(sort) = sort {
        console.set_sort(sort.parse::<SortState>()?);
    }

    let visible = console.view();
    let sort = console.sort();

    if json_output {
        let output = json!({
            "filter": console.filter(),
            "sort": sort,
            "total": console.orders().len(),
            "orders": visible,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!(
        "{} {}",
        format!("📦 {} of {} orders", visible.len(), console.orders().len()).bold(),
        format!("({})", console.filter().label()).dimmed()
    );
    match sort.column {
        Some(column) if sort.is_active() => {
            println!("{}", format!("Sorted by {column} {}", sort.direction).dimmed());
        }
        _ => println!("{}", "Unsorted".dimmed()),
    }
    println!();

    if visible.is_empty() {
        println!("{}", "No orders match this filter.".yellow());
        return Ok(());
    }

    let rows: Vec<OrderRow> = visible.iter().map(OrderRow::from).collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    let noted: Vec<String> = visible
        .iter()
        .filter(|order| order.notes.is_some())
        .map(|order| format!("  {} {}: {}", "•".dimmed(), colors::status_label(order.status), order.order_number))
        .collect();
    if !noted.is_empty() {
        println!();
        println!("{}", "Orders with notes:".bold());
        for line in noted {
            println!("{line}");
        }
    }

    Ok(())
}
