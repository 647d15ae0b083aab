//! Command implementations for the Triage CLI.

pub mod classify;
pub mod counts;
pub mod orders;
pub mod thresholds;
pub mod transcript;

use anyhow::Context;
use std::path::Path;
use triage_core::{InMemoryOrderStore, Order, OrderStore};

/// Opens the order store backed by a JSON snapshot file.
pub(crate) async fn open_store(path: &Path) -> anyhow::Result<InMemoryOrderStore> {
    InMemoryOrderStore::from_json_file(path)
        .await
        .with_context(|| format!("Failed to load orders from {}", path.display()))
}

/// Loads every order from a JSON snapshot file.
pub(crate) async fn load_orders(path: &Path) -> anyhow::Result<Vec<Order>> {
    let store = open_store(path).await?;
    Ok(store.list_all().await?)
}
