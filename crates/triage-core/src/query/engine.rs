//! Filtered, sorted order view and per-status tallies.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::filter::StatusFilter;
use super::sort::SortState;
use crate::lifecycle::OrderStatus;
use crate::order::Order;

/// Orders passing `filter`, ordered by `sort`.
///
/// Filtering preserves input order. The sort is stable, so equal keys and
/// the unsorted state both keep filter output order.
#[must_use]
pub fn view(orders: &[Order], filter: StatusFilter, sort: &SortState) -> Vec<Order> {
    let mut visible: Vec<Order> = orders.iter().filter(|order| filter.matches(order)).cloned().collect();

    if let Some(comparator) = sort.comparator() {
        visible.sort_by(comparator);
    }

    trace!(
        total = orders.len(),
        visible = visible.len(),
        filter = %filter,
        column = ?sort.column,
        direction = %sort.direction,
        "Order view computed"
    );
    visible
}

/// Number of orders passing `filter`.
#[must_use]
pub fn count_by_status(orders: &[Order], filter: StatusFilter) -> usize {
    orders.iter().filter(|order| filter.matches(order)).count()
}

/// Badge counts for every filter tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabCounts {
    /// Every order.
    pub all: usize,
    /// `support_required`.
    pub support_required: usize,
    /// `action_required`.
    pub action_required: usize,
    /// `ai_resolving`.
    pub ai_resolving: usize,
    /// `completed`.
    pub completed: usize,
}

impl TabCounts {
    /// Count for one tab.
    #[must_use]
    pub const fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Status(OrderStatus::SupportRequired) => self.support_required,
            StatusFilter::Status(OrderStatus::ActionRequired) => self.action_required,
            StatusFilter::Status(OrderStatus::AiResolving) => self.ai_resolving,
            StatusFilter::Status(OrderStatus::Completed) => self.completed,
        }
    }

    /// Sets the count for one tab.
    pub fn set(&mut self, filter: StatusFilter, count: usize) {
        let slot = match filter {
            StatusFilter::All => &mut self.all,
            StatusFilter::Status(OrderStatus::SupportRequired) => &mut self.support_required,
            StatusFilter::Status(OrderStatus::ActionRequired) => &mut self.action_required,
            StatusFilter::Status(OrderStatus::AiResolving) => &mut self.ai_resolving,
            StatusFilter::Status(OrderStatus::Completed) => &mut self.completed,
        };
        *slot = count;
    }

    /// `(filter, count)` pairs in tab order.
    pub fn iter(&self) -> impl Iterator<Item = (StatusFilter, usize)> + '_ {
        StatusFilter::TABS.into_iter().map(|filter| (filter, self.get(filter)))
    }
}

/// Counts for every tab.
#[must_use]
pub fn status_counts(orders: &[Order]) -> TabCounts {
    TabCounts {
        all: count_by_status(orders, StatusFilter::All),
        support_required: count_by_status(orders, OrderStatus::SupportRequired.into()),
        action_required: count_by_status(orders, OrderStatus::ActionRequired.into()),
        ai_resolving: count_by_status(orders, OrderStatus::AiResolving.into()),
        completed: count_by_status(orders, OrderStatus::Completed.into()),
    }
}
