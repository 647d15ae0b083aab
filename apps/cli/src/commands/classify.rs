//! Classify command implementation.

use colored::Colorize;
use serde_json::json;
use triage_core::{RiskScore, TriageConfig, bands, update_thresholds};

use crate::colors;

/// Execute the classify command.
pub fn execute(
    config: &TriageConfig,
    score: f64,
    probability: bool,
    manual: Option<u8>,
    agent: Option<u8>,
    json_output: bool,
) -> anyhow::Result<()> {
    let base = config.threshold_config();
    let thresholds = if manual.is_some() || agent.is_some() {
        update_thresholds(&base, manual.unwrap_or(base.manual()), agent.unwrap_or(base.agent()))
    } else {
        base
    };

    let score =
        if probability { RiskScore::from_failure_probability(score) } else { RiskScore::from_percent(score) };
    let zone = score.zone(&thresholds);

    if json_output {
        let output = json!({
            "score": score.value(),
            "zone": zone,
            "label": zone.label(),
            "riskLevel": zone.risk_level(),
            "thresholds": thresholds,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!(
        "{} {} {}",
        format!("Risk {:.1}%", score.value()).bold(),
        "→".dimmed(),
        format!("{} ({})", zone.label(), zone.risk_level()).color(colors::zone_color(zone)).bold()
    );
    println!();
    for band in bands(&thresholds) {
        let marker = if band.zone == zone { "▶" } else { " " };
        println!("  {marker} {}", band.describe().color(colors::zone_color(band.zone)));
    }
    Ok(())
}
