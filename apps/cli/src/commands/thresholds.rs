//! Thresholds command implementation.
//!
//! Applies a proposed pair through the auto-repair and acknowledges it.

use colored::Colorize;
use serde_json::json;
use triage_core::{ThresholdSettings, TriageConfig};

use crate::colors;

/// Execute the thresholds command.
pub fn execute(config: &TriageConfig, manual: u8, agent: u8, json_output: bool) -> anyhow::Result<()> {
    let mut settings = ThresholdSettings::new(config.threshold_config());
    let applied = settings.update(manual, agent);
    let repaired = (applied.manual(), applied.agent()) != (manual, agent);
    let ack = settings.save();

    if json_output {
        let bands: Vec<_> = settings
            .bands()
            .iter()
            .map(|band| {
                json!({
                    "zone": band.zone,
                    "lower": band.lower,
                    "upper": band.upper,
                    "description": band.describe(),
                })
            })
            .collect();
        let output = json!({
            "proposed": { "manual": manual, "agent": agent },
            "manual": applied.manual(),
            "agent": applied.agent(),
            "repaired": repaired,
            "bands": bands,
            "savedAt": ack.saved_at,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    if repaired {
        println!(
            "{}",
            format!(
                "⚠️  Proposed {manual}/{agent} repaired to {}/{}",
                applied.manual(),
                applied.agent()
            )
            .yellow()
        );
    }
    println!(
        "{} manual {}%, agent {}%",
        "Thresholds:".bold(),
        applied.manual(),
        applied.agent()
    );
    println!();
    for band in settings.bands() {
        println!("  {}", band.describe().color(colors::zone_color(band.zone)));
    }
    println!();
    println!(
        "{}",
        format!("✓ Configuration saved at {}", ack.saved_at.format("%Y-%m-%d %H:%M:%S UTC")).green()
    );
    Ok(())
}
