//! `moka`-based product cache.

use super::ProductCache;
use async_trait::async_trait;
use catalog_core::{Product, ProductId};
use moka::future::Cache;
use moka::Expiry;
use shaku::Component;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default maximum number of cached products.
pub const DEFAULT_CAPACITY: u64 = 10_000;

/// Cached value together with the TTL it was written with.
#[derive(Debug, Clone)]
pub struct CachedProduct {
    product: Product,
    ttl: Duration,
}

/// Per-entry expiry: every write restarts the clock, reads leave it alone.
struct WriteExpiry;

impl Expiry<ProductId, CachedProduct> for WriteExpiry {
    fn expire_after_create(
        &self,
        _key: &ProductId,
        value: &CachedProduct,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &ProductId,
        value: &CachedProduct,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory product cache with per-entry TTL.
#[derive(Component)]
#[shaku(interface = ProductCache)]
pub struct MokaProductCache {
    cache: Cache<ProductId, CachedProduct>,
}

impl MokaProductCache {
    /// Creates a cache holding at most `max_capacity` products.
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            cache: Self::build_cache(max_capacity),
        }
    }

    /// Component parameters for a cache of `max_capacity` products.
    #[must_use]
    pub fn parameters(max_capacity: u64) -> MokaProductCacheParameters {
        MokaProductCacheParameters {
            cache: Self::build_cache(max_capacity),
        }
    }

    fn build_cache(max_capacity: u64) -> Cache<ProductId, CachedProduct> {
        Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(WriteExpiry)
            .build()
    }
}

impl Default for MokaProductCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl ProductCache for MokaProductCache {
    async fn insert(&self, id: ProductId, product: Product, ttl: Duration) {
        debug!(product_id = %id, ttl_secs = ttl.as_secs(), "Caching product");
        self.cache.insert(id, CachedProduct { product, ttl }).await;
    }

    async fn get(&self, id: &ProductId) -> Option<Product> {
        self.cache.get(id).await.map(|entry| entry.product)
    }

    async fn remove(&self, id: &ProductId) {
        debug!(product_id = %id, "Evicting cached product");
        self.cache.invalidate(id).await;
    }

    async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

impl std::fmt::Debug for MokaProductCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaProductCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}
