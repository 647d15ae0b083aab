//! Live transcript session for the order being viewed.
//!
//! The transcript is regenerated whenever the observed order's identity or
//! status changes. Operator messages are appended immediately and each one
//! schedules exactly one delayed counter-reply. A reply is discarded instead
//! of appended if the observed order changed before it fired.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::message::{ChatMessage, Sender};
use super::templates::{counter_reply, synthesize};
use crate::lifecycle::OrderStatus;
use crate::order::{Order, OrderId};

/// Delay before the simulated counter-reply is appended.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Shared transcript state.
#[derive(Debug, Default)]
struct TranscriptState {
    /// Observed order, if any.
    order_id: Option<OrderId>,
    /// Status the transcript was generated for.
    status: Option<OrderStatus>,
    /// Bumped on every regeneration; pending replies carry the value they saw.
    generation: u64,
    /// Messages in display order.
    messages: Vec<ChatMessage>,
}

/// Handle to a scheduled counter-reply.
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<bool>,
}

impl PendingReply {
    /// Waits for the reply to resolve.
    ///
    /// # Returns
    /// `true` if the reply was appended, `false` if it was cancelled or
    /// discarded as stale.
    pub async fn delivered(self) -> bool {
        self.handle.await.unwrap_or(false)
    }

    /// Whether the reply has resolved either way.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Transcript owned by the session viewing one order.
#[derive(Debug)]
pub struct TranscriptSession {
    state: Arc<Mutex<TranscriptState>>,
    /// Cancels every reply scheduled for the current generation.
    cancel: CancellationToken,
    reply_delay: Duration,
}

impl TranscriptSession {
    /// Creates an empty session with the given reply delay.
    #[must_use]
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(TranscriptState::default())),
            cancel: CancellationToken::new(),
            reply_delay,
        }
    }

    /// Points the session at `order`.
    ///
    /// Regenerates the transcript from the status template when the order's
    /// identity or status differs from what the session last observed, which
    /// also discards any user messages and cancels pending replies.
    ///
    /// # Returns
    /// `true` if the transcript was regenerated.
    pub async fn observe(&mut self, order: &Order) -> bool {
        let mut state = self.state.lock().await;
        if state.order_id.as_ref() == Some(&order.id) && state.status == Some(order.status) {
            return false;
        }

        self.cancel.cancel();
        self.cancel = CancellationToken::new();

        state.order_id = Some(order.id.clone());
        state.status = Some(order.status);
        state.generation += 1;
        state.messages = synthesize(order);

        info!(
            order_id = %order.id,
            status = %order.status,
            generation = state.generation,
            messages = state.messages.len(),
            "Transcript regenerated"
        );
        true
    }

    /// Detaches the session from any order and cancels pending replies.
    pub async fn clear(&mut self) {
        let mut state = self.state.lock().await;
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        state.order_id = None;
        state.status = None;
        state.generation += 1;
        state.messages.clear();
        debug!("Transcript cleared");
    }

    /// Appends an operator message and schedules one counter-reply.
    ///
    /// Whitespace-only input is ignored.
    ///
    /// # Returns
    /// The pending reply, or `None` if nothing was sent.
    pub async fn send(&self, text: &str) -> Option<PendingReply> {
        if text.trim().is_empty() {
            debug!("Ignoring empty operator message");
            return None;
        }

        let (generation, status, order_id) = {
            let mut state = self.state.lock().await;
            state.messages.push(ChatMessage::live(Sender::User, text));
            (state.generation, state.status, state.order_id.clone())
        };

        debug!(
            order_id = ?order_id,
            generation,
            delay_ms = self.reply_delay.as_millis() as u64,
            "Counter-reply scheduled"
        );

        let state = Arc::clone(&self.state);
        let token = self.cancel.clone();
        let delay = self.reply_delay;
        let reply = counter_reply(status);

        let handle = tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    debug!(order_id = ?order_id, generation, "Counter-reply cancelled");
                    false
                }
                () = tokio::time::sleep(delay) => {
                    let mut state = state.lock().await;
                    if state.generation == generation {
                        state.messages.push(ChatMessage::live(Sender::Ai, reply));
                        debug!(order_id = ?order_id, generation, "Counter-reply delivered");
                        true
                    } else {
                        debug!(
                            order_id = ?order_id,
                            generation,
                            current = state.generation,
                            "Discarding stale counter-reply"
                        );
                        false
                    }
                }
            }
        });

        Some(PendingReply { handle })
    }

    /// Snapshot of the transcript.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().await.messages.clone()
    }

    /// The observed order, if any.
    pub async fn order_id(&self) -> Option<OrderId> {
        self.state.lock().await.order_id.clone()
    }

    /// Configured reply delay.
    #[must_use]
    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }
}

impl Default for TranscriptSession {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

impl Drop for TranscriptSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
