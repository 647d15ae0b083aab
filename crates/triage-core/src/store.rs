//! Order store boundary.
//!
//! The console reads orders from an external store and only ever writes back
//! externally asserted status changes. [`InMemoryOrderStore`] serves a JSON
//! snapshot of the store, which is also what the CLI loads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Result, TriageError};
use crate::lifecycle::{OrderLifecycle, OrderStatus, StatusChange};
use crate::order::Order;
use crate::query::{StatusFilter, TabCounts};

/// Default page size for [`PageQuery`].
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Largest page the store will return.
pub const MAX_PAGE_LIMIT: usize = 10_000;

/// A filtered page of orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    /// Status filter applied before paging.
    pub filter: StatusFilter,
    /// Maximum number of orders, clamped to `1..=MAX_PAGE_LIMIT`.
    pub limit: usize,
    /// Orders to skip.
    pub offset: usize,
}

impl PageQuery {
    /// First page of `filter` with the default limit.
    #[must_use]
    pub fn filtered(filter: StatusFilter) -> Self {
        Self { filter, ..Self::default() }
    }

    /// Effective limit after clamping.
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_LIMIT)
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { filter: StatusFilter::All, limit: DEFAULT_PAGE_LIMIT, offset: 0 }
    }
}

/// Read path of the external order store, plus status assertion.
///
/// Implementations must be `Send + Sync` so a console can share one store
/// across tasks.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Orders matching `query.filter`, in store order, paged.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    async fn list(&self, query: &PageQuery) -> Result<Vec<Order>>;

    /// Looks an order up by `id`, falling back to `orderNumber`.
    ///
    /// # Errors
    /// Returns `TriageError::OrderNotFound` if neither matches.
    async fn get(&self, key: &str) -> Result<Order>;

    /// Number of orders matching `filter`.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    async fn count(&self, filter: StatusFilter) -> Result<usize>;

    /// Overwrites the status of the order identified by `key`.
    ///
    /// # Errors
    /// Returns `TriageError::OrderNotFound` if no order matches.
    async fn assert_status(&self, key: &str, status: OrderStatus) -> Result<StatusChange>;

    /// Every order, fetched page by page in store order.
    ///
    /// # Errors
    /// Returns an error if any page cannot be read.
    async fn list_all(&self) -> Result<Vec<Order>> {
        let mut query = PageQuery { limit: MAX_PAGE_LIMIT, ..PageQuery::default() };
        let mut orders = Vec::new();
        loop {
            let page = self.list(&query).await?;
            let done = page.len() < query.effective_limit();
            query.offset += page.len();
            orders.extend(page);
            if done {
                return Ok(orders);
            }
        }
    }

    /// Badge counts for every filter tab.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    async fn tab_counts(&self) -> Result<TabCounts> {
        let mut counts = TabCounts::default();
        for filter in StatusFilter::TABS {
            counts.set(filter, self.count(filter).await?);
        }
        Ok(counts)
    }
}

/// Order store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    /// Creates a store over `orders`, kept in the given order.
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders: RwLock::new(orders) }
    }

    /// Parses a JSON array of orders.
    ///
    /// # Errors
    /// Returns `TriageError::Json` if the document is not an order array.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let orders: Vec<Order> = serde_json::from_str(json)?;
        Ok(Self::new(orders))
    }

    /// Loads a JSON array of orders from `path`.
    ///
    /// # Errors
    /// Returns `TriageError::Io` if the file cannot be read and
    /// `TriageError::Json` if it does not hold an order array.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let store = Self::from_json_str(&content)?;
        info!(path = %path.display(), orders = store.orders.read().await.len(), "Loaded order snapshot");
        Ok(store)
    }

    /// Every order, in store order.
    pub async fn snapshot(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }
}

/// Index of the order whose id, or failing that order number, equals `key`.
pub(crate) fn position(orders: &[Order], key: &str) -> Option<usize> {
    orders
        .iter()
        .position(|order| order.id.as_str() == key)
        .or_else(|| orders.iter().position(|order| order.order_number == key))
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn list(&self, query: &PageQuery) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let page: Vec<Order> = orders
            .iter()
            .filter(|order| query.filter.matches(order))
            .skip(query.offset)
            .take(query.effective_limit())
            .cloned()
            .collect();
        debug!(
            filter = %query.filter,
            limit = query.effective_limit(),
            offset = query.offset,
            returned = page.len(),
            "Listed orders"
        );
        Ok(page)
    }

    async fn get(&self, key: &str) -> Result<Order> {
        let orders = self.orders.read().await;
        let found = position(&orders, key).map(|idx| orders[idx].clone());
        debug!(key, found = found.is_some(), "Order lookup");
        found.ok_or_else(|| TriageError::OrderNotFound(key.to_string()))
    }

    async fn count(&self, filter: StatusFilter) -> Result<usize> {
        let orders = self.orders.read().await;
        Ok(crate::query::count_by_status(&orders, filter))
    }

    async fn assert_status(&self, key: &str, status: OrderStatus) -> Result<StatusChange> {
        let mut orders = self.orders.write().await;
        let idx = position(&orders, key).ok_or_else(|| TriageError::OrderNotFound(key.to_string()))?;
        Ok(OrderLifecycle::assert_status(&mut orders[idx], status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::test_support::sample_order;

    fn store() -> InMemoryOrderStore {
        InMemoryOrderStore::new(vec![
            sample_order("1", OrderStatus::Completed),
            sample_order("2", OrderStatus::SupportRequired),
            sample_order("3", OrderStatus::SupportRequired),
            sample_order("4", OrderStatus::ActionRequired),
        ])
    }

    #[tokio::test]
    async fn test_list_filters_and_pages() {
        let store = store();
        let all = store.list(&PageQuery::default()).await.unwrap();
        assert_eq!(all.len(), 4);

        let query = PageQuery { offset: 1, limit: 1, ..PageQuery::filtered(OrderStatus::SupportRequired.into()) };
        let page = store.list(&query).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id.as_str(), "3");
    }

    #[tokio::test]
    async fn test_zero_limit_is_clamped() {
        let store = store();
        let query = PageQuery { limit: 0, ..PageQuery::default() };
        assert_eq!(store.list(&query).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_id_or_order_number() {
        let store = store();
        assert_eq!(store.get("2").await.unwrap().order_number, "ORD-2024-002");
        assert_eq!(store.get("ORD-2024-004").await.unwrap().id.as_str(), "4");
        assert!(matches!(store.get("ORD-9").await, Err(TriageError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn test_count() {
        let store = store();
        assert_eq!(store.count(StatusFilter::All).await.unwrap(), 4);
        assert_eq!(store.count(OrderStatus::SupportRequired.into()).await.unwrap(), 2);
        assert_eq!(store.count(OrderStatus::AiResolving.into()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_assert_status_overwrites() {
        let store = store();
        let change = store.assert_status("4", OrderStatus::AiResolving).await.unwrap();
        assert_eq!(change.from, OrderStatus::ActionRequired);
        assert_eq!(change.to, OrderStatus::AiResolving);
        assert_eq!(store.get("4").await.unwrap().status, OrderStatus::AiResolving);
        assert!(store.assert_status("missing", OrderStatus::Completed).await.is_err());
    }

    #[tokio::test]
    async fn test_list_all_walks_every_page() {
        let orders: Vec<Order> =
            (0..MAX_PAGE_LIMIT + 3).map(|n| sample_order(&n.to_string(), OrderStatus::Completed)).collect();
        let store = InMemoryOrderStore::new(orders.clone());
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), orders.len());
        assert_eq!(all.last().map(|o| o.id.as_str()), Some("10002"));

        let empty = InMemoryOrderStore::default();
        assert!(empty.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tab_counts_match_snapshot_counts() {
        let store = store();
        let counts = store.tab_counts().await.unwrap();
        assert_eq!(counts, crate::query::status_counts(&store.snapshot().await));
        assert_eq!(counts.support_required, 2);
    }

    #[test]
    fn test_from_json_str_reads_wire_names() {
        let json = r#"[{
            "id": "7",
            "orderNumber": "ORD-2024-007",
            "customer": "Oulu Market",
            "destination": "Oulu",
            "status": "action_required",
            "items": [{"id": "a", "name": "Rye Bread", "sku": "RYE-1", "quantity": 10}],
            "totalValue": 250.0,
            "createdAt": "2024-02-01T08:00:00",
            "notes": "Partial delivery"
        }]"#;
        let store = InMemoryOrderStore::from_json_str(json).unwrap();
        let orders = store.orders.try_read().unwrap();
        assert_eq!(orders[0].status, OrderStatus::ActionRequired);
        assert_eq!(orders[0].notes.as_deref(), Some("Partial delivery"));
    }

    #[test]
    fn test_from_json_str_rejects_unknown_status() {
        let json = r#"[{"id": "1", "orderNumber": "X", "customer": "C", "destination": "D",
            "status": "shipped", "totalValue": 1.0, "createdAt": "2024-01-01"}]"#;
        assert!(matches!(InMemoryOrderStore::from_json_str(json), Err(TriageError::Json(_))));
    }

    #[tokio::test]
    async fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        let orders = vec![sample_order("1", OrderStatus::Completed)];
        std::fs::write(&path, serde_json::to_string(&orders).unwrap()).unwrap();

        let store = InMemoryOrderStore::from_json_file(&path).await.unwrap();
        assert_eq!(store.snapshot().await, orders);

        let missing = InMemoryOrderStore::from_json_file(dir.path().join("nope.json")).await;
        assert!(matches!(missing, Err(TriageError::Io(_))));
    }
}
