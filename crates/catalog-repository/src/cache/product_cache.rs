//! Cache interface trait for product entries.

use async_trait::async_trait;
use catalog_core::{Interface, Product, ProductId};
use std::time::Duration;

/// TTL cache keyed by product id.
///
/// Implementations must be safe to share across tasks. A read never
/// extends an entry's lifetime; only `insert` starts a fresh TTL.
#[async_trait]
pub trait ProductCache: Interface + Send + Sync {
    /// Stores `product` under `id`, replacing any existing entry.
    async fn insert(&self, id: ProductId, product: Product, ttl: Duration);

    /// Returns the entry if present and not expired.
    async fn get(&self, id: &ProductId) -> Option<Product>;

    /// Removes the entry; absent keys are a no-op.
    async fn remove(&self, id: &ProductId);

    /// Number of live entries after pending maintenance has run.
    async fn entry_count(&self) -> u64;
}
