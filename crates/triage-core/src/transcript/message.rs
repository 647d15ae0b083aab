//! Transcript message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who a transcript message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The ordering customer.
    Customer,
    /// The automated responder / agent.
    Ai,
    /// System notices and banners.
    System,
    /// The operator viewing the transcript.
    User,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Customer => "customer",
            Self::Ai => "ai",
            Self::System => "system",
            Self::User => "user",
        };
        f.write_str(name)
    }
}

/// One transcript entry. `content` may contain embedded newlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message id, unique within its transcript.
    pub id: String,
    /// Author.
    pub sender: Sender,
    /// Text.
    pub content: String,
    /// When the message was (or is narrated as) sent.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Builds a message with an explicit id and timestamp.
    pub fn new(
        id: impl Into<String>,
        sender: Sender,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self { id: id.into(), sender, content: content.into(), timestamp }
    }

    /// Builds a message sent now, with a fresh id.
    pub fn live(sender: Sender, content: impl Into<String>) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), sender, content, Utc::now())
    }

    /// Content split at embedded newlines, as rendered line by line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }
}
