//! Per-order communication transcripts.
//!
//! A transcript is a fixed narrative template keyed by order status, plus any
//! messages the operator sends while viewing the order and the delayed
//! counter-replies they trigger.

pub mod message;
pub mod session;
pub mod templates;

pub use message::{ChatMessage, Sender};
pub use session::{DEFAULT_REPLY_DELAY, PendingReply, TranscriptSession};
pub use templates::{counter_reply, session_started, synthesize, synthesize_with_status};
