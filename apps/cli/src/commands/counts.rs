//! Counts command implementation.

use colored::Colorize;
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};
use triage_core::{OrderStore, StatusFilter};

use super::open_store;

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Tab")]
    tab: String,
    #[tabled(rename = "Filter")]
    filter: String,
    #[tabled(rename = "Orders")]
    count: usize,
}

/// Execute the counts command.
pub async fn execute(file: &Path, json_output: bool) -> anyhow::Result<()> {
    let store = open_store(file).await?;
    let counts = store.tab_counts().await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    let rows: Vec<CountRow> = counts
        .iter()
        .map(|(filter, count)| CountRow {
            tab: filter.label().to_string(),
            filter: filter.to_string(),
            count,
        })
        .collect();

    println!();
    println!("{}", format!("📊 {} orders", counts.get(StatusFilter::All)).bold());
    println!();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    Ok(())
}
