//! Terminal colors for statuses, zones and transcript senders.

use colored::{Color, ColoredString, Colorize};
use triage_core::{OrderStatus, RiskZone, Sender, StatusTone};

/// Terminal color for a status tone.
pub fn tone_color(tone: StatusTone) -> Color {
    match tone {
        // orange-500
        StatusTone::Critical => Color::TrueColor { r: 249, g: 115, b: 22 },
        // amber-500
        StatusTone::Warning => Color::TrueColor { r: 245, g: 158, b: 11 },
        // blue-500
        StatusTone::Info => Color::TrueColor { r: 59, g: 130, b: 246 },
        // emerald-500
        StatusTone::Success => Color::TrueColor { r: 16, g: 185, b: 129 },
    }
}

/// Status label in its tone color.
pub fn status_label(status: OrderStatus) -> ColoredString {
    status.label().color(tone_color(status.tone()))
}

/// Terminal color for a zone.
pub fn zone_color(zone: RiskZone) -> Color {
    match zone {
        RiskZone::NoAction => Color::Green,
        RiskZone::ManualReview => Color::Yellow,
        RiskZone::AgenticHandling => Color::Red,
    }
}

/// Sender name as shown in a transcript.
pub fn sender_label(sender: Sender) -> ColoredString {
    match sender {
        Sender::Customer => "Customer".cyan().bold(),
        Sender::Ai => "AI".blue().bold(),
        Sender::System => "System".dimmed(),
        Sender::User => "You".green().bold(),
    }
}
