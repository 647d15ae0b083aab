//! Operations console session.
//!
//! Owns the order collection, threshold settings, view controls, selection
//! and live transcript of one operator, and exposes each interaction as an
//! explicit operation.

use tracing::{debug, info};

use crate::config::{self, TriageConfig};
use crate::error::{Result, TriageError};
use crate::lifecycle::{OrderLifecycle, OrderStatus, StatusChange};
use crate::order::{Order, OrderId};
use crate::query::{self, SortColumn, SortState, StatusFilter, TabCounts};
use crate::store::position;
use crate::transcript::{ChatMessage, PendingReply, TranscriptSession};
use crate::zones::{RiskZone, SaveAck, ThresholdConfig, ThresholdSettings, classify};

/// One operator's console over a set of orders.
#[derive(Debug)]
pub struct OpsConsole {
    orders: Vec<Order>,
    thresholds: ThresholdSettings,
    filter: StatusFilter,
    sort: SortState,
    selected: Option<OrderId>,
    transcript: TranscriptSession,
}

impl OpsConsole {
    /// Console over `orders` with default settings.
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders,
            thresholds: ThresholdSettings::default(),
            filter: StatusFilter::All,
            sort: SortState::default(),
            selected: None,
            transcript: TranscriptSession::default(),
        }
    }

    /// Console over `orders` configured from `config`.
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` if the view settings do not parse.
    pub fn with_config(orders: Vec<Order>, config: &TriageConfig) -> config::Result<Self> {
        Ok(Self {
            orders,
            thresholds: ThresholdSettings::new(config.threshold_config()),
            filter: config.status_filter()?,
            sort: config.sort_state()?,
            selected: None,
            transcript: TranscriptSession::new(config.reply_delay()),
        })
    }

    /// All orders, in collection order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Active status filter.
    #[must_use]
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Switches the status filter. The sort state is kept.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        debug!(from = %self.filter, to = %filter, "Filter changed");
        self.filter = filter;
    }

    /// Active sort state.
    #[must_use]
    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Replaces the sort state outright.
    pub fn set_sort(&mut self, sort: SortState) {
        debug!(column = ?sort.column, direction = %sort.direction, "Sort set");
        self.sort = sort;
    }

    /// Applies a column header click and returns the new sort state.
    pub fn click_sort(&mut self, column: SortColumn) -> SortState {
        self.sort.click(column);
        debug!(column = %column, direction = %self.sort.direction, "Sort changed");
        self.sort
    }

    /// Filtered, sorted view.
    #[must_use]
    pub fn view(&self) -> Vec<Order> {
        query::view(&self.orders, self.filter, &self.sort)
    }

    /// Badge counts over the whole collection.
    #[must_use]
    pub fn counts(&self) -> TabCounts {
        query::status_counts(&self.orders)
    }

    /// The selected order, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Order> {
        let id = self.selected.as_ref()?;
        self.orders.iter().find(|order| &order.id == id)
    }

    /// Selects an order by id or order number and regenerates its transcript
    /// when the selection or its status changed.
    ///
    /// # Errors
    /// Returns `TriageError::OrderNotFound` if nothing matches `key`.
    pub async fn select_order(&mut self, key: &str) -> Result<&Order> {
        let idx = position(&self.orders, key).ok_or_else(|| TriageError::OrderNotFound(key.to_string()))?;
        let order = &self.orders[idx];
        self.selected = Some(order.id.clone());
        self.transcript.observe(order).await;
        info!(order_id = %order.id, order_number = %order.order_number, "Order selected");
        Ok(order)
    }

    /// Clears the selection and its transcript.
    pub async fn deselect(&mut self) {
        self.selected = None;
        self.transcript.clear().await;
    }

    /// Asserts a new status on an order. If it is the selected order, the
    /// transcript is regenerated for the new status.
    ///
    /// # Errors
    /// Returns `TriageError::OrderNotFound` if nothing matches `key`.
    pub async fn assert_status(&mut self, key: &str, status: OrderStatus) -> Result<StatusChange> {
        let idx = position(&self.orders, key).ok_or_else(|| TriageError::OrderNotFound(key.to_string()))?;
        let order = &mut self.orders[idx];
        let change = OrderLifecycle::assert_status(order, status);

        if self.selected.as_ref() == Some(&order.id) {
            self.transcript.observe(order).await;
        }
        Ok(change)
    }

    /// Transcript of the selected order.
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.messages().await
    }

    /// Sends an operator message on the selected order's transcript.
    ///
    /// # Returns
    /// The pending counter-reply, or `None` for blank input.
    pub async fn send_message(&self, text: &str) -> Option<PendingReply> {
        self.transcript.send(text).await
    }

    /// Live threshold settings.
    #[must_use]
    pub fn thresholds(&self) -> &ThresholdSettings {
        &self.thresholds
    }

    /// Applies a threshold proposal with auto-repair.
    pub fn update_thresholds(&mut self, proposed_manual: u8, proposed_agent: u8) -> ThresholdConfig {
        self.thresholds.update(proposed_manual, proposed_agent)
    }

    /// Acknowledges the live thresholds as saved.
    pub fn save_thresholds(&mut self) -> SaveAck {
        self.thresholds.save()
    }

    /// Zone of `score` under the live thresholds.
    #[must_use]
    pub fn zone_for(&self, score: f64) -> RiskZone {
        classify(score, &self.thresholds.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::test_support::sample_order;
    use crate::transcript::Sender;
    use std::time::Duration;

    fn console() -> OpsConsole {
        console_with_delay(10)
    }

    fn console_with_delay(reply_delay_ms: u64) -> OpsConsole {
        let orders = vec![
            sample_order("1", OrderStatus::Completed),
            sample_order("2", OrderStatus::SupportRequired),
            sample_order("3", OrderStatus::ActionRequired),
        ];
        let config = TriageConfig {
            transcript: config::TranscriptSection { reply_delay_ms },
            ..TriageConfig::default()
        };
        OpsConsole::with_config(orders, &config).unwrap()
    }

    #[test]
    fn test_initial_view_sorted_by_status() {
        let console = console();
        let ids: Vec<_> = console.view().iter().map(|o| o.id.to_string()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
        assert_eq!(console.counts().all, 3);
    }

    #[test]
    fn test_filter_and_sort_controls() {
        let mut console = console();
        console.set_filter(OrderStatus::Completed.into());
        assert_eq!(console.view().len(), 1);

        console.set_filter(StatusFilter::All);
        console.click_sort(SortColumn::Status);
        assert_eq!(console.view()[0].id.as_str(), "1");
        console.click_sort(SortColumn::Status);
        let ids: Vec<_> = console.view().iter().map(|o| o.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_select_by_order_number() {
        let mut console = console();
        let order = console.select_order("ORD-2024-003").await.unwrap();
        assert_eq!(order.id.as_str(), "3");
        assert_eq!(console.transcript().await.len(), 3);
        assert!(console.select_order("missing").await.is_err());
        assert_eq!(console.selected().map(|o| o.id.as_str()), Some("3"));
    }

    #[tokio::test]
    async fn test_status_assertion_regenerates_selected_transcript() {
        let mut console = console_with_delay(200);
        console.select_order("3").await.unwrap();
        let pending = console.send_message("hello").await.unwrap();

        let change = console.assert_status("3", OrderStatus::AiResolving).await.unwrap();
        assert_eq!(change.from, OrderStatus::ActionRequired);
        assert!(!pending.delivered().await);

        let transcript = console.transcript().await;
        assert_eq!(transcript.len(), 7);
        assert!(transcript.iter().all(|m| m.sender != Sender::User));
        assert_eq!(console.counts().ai_resolving, 1);
    }

    #[tokio::test]
    async fn test_status_assertion_on_other_order_keeps_transcript() {
        let mut console = console();
        console.select_order("1").await.unwrap();
        console.send_message("thanks").await.unwrap().delivered().await;

        console.assert_status("2", OrderStatus::Completed).await.unwrap();
        assert_eq!(console.transcript().await.len(), 9);
    }

    #[tokio::test]
    async fn test_deselect_clears_transcript() {
        let mut console = console();
        console.select_order("1").await.unwrap();
        console.deselect().await;
        assert!(console.selected().is_none());
        assert!(console.transcript().await.is_empty());
    }

    #[test]
    fn test_threshold_flow() {
        let mut console = console();
        assert_eq!(console.zone_for(70.0), RiskZone::ManualReview);

        let config = console.update_thresholds(60, 60);
        assert_eq!((config.manual(), config.agent()), (59, 60));
        assert_eq!(console.zone_for(70.0), RiskZone::AgenticHandling);
        assert!(!console.thresholds().is_saved());

        let ack = console.save_thresholds();
        assert_eq!(ack.config, config);
        assert!(console.thresholds().is_saved());
    }

    #[test]
    fn test_reply_delay_from_config() {
        let console = console();
        assert_eq!(console.transcript.reply_delay(), Duration::from_millis(10));
    }
}
