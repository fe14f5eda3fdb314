//! Cache-augmented product repository.
//!
//! Implements the [`ProductRepository`] domain interface by coordinating a
//! [`ProductDao`] with a [`ProductCache`]:
//!
//! ```text
//! Service
//!   ↓ Arc<dyn ProductRepository>
//! ProductRepositoryImpl       ← store first, then keep the cache in step
//!   ↓ Arc<dyn ProductDao>     ↘ Arc<dyn ProductCache>
//! PostgresProductDao            MokaProductCache
//! ```
//!
//! The cache is only ever written after the store reported success, so a
//! cached entry never claims a state the store did not accept.
//!
//! Read-through races with writers: a `get` that read the store before a
//! concurrent update or delete must not put the older row back. Every
//! successful store mutation bumps a write sequence before touching the
//! cache, and a read-through that sees the sequence move evicts what it
//! just inserted.
//!
//! [`ProductRepository`]: crate::traits::ProductRepository
//! [`ProductDao`]: crate::dao::ProductDao
//! [`ProductCache`]: crate::cache::ProductCache

use crate::{cache::ProductCache, dao::ProductDao, metrics::CacheMetrics, traits::ProductRepository};
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, Product, ProductDigest, ProductDraft, ProductId};
use shaku::Component;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default lifetime of a cache entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// Repository implementation that keeps a per-instance cache in front of
/// a [`ProductDao`](crate::dao::ProductDao).
#[derive(Component)]
#[shaku(interface = ProductRepository)]
pub struct ProductRepositoryImpl {
    #[shaku(inject)]
    product_dao: Arc<dyn ProductDao>,

    #[shaku(inject)]
    cache: Arc<dyn ProductCache>,

    #[shaku(default = DEFAULT_TTL)]
    ttl: Duration,

    /// Bumped after every successful store mutation.
    #[shaku(default)]
    write_seq: AtomicU64,
}

impl ProductRepositoryImpl {
    /// Creates a repository with the default TTL.
    #[must_use]
    pub fn new(product_dao: Arc<dyn ProductDao>, cache: Arc<dyn ProductCache>) -> Self {
        Self::with_ttl(product_dao, cache, DEFAULT_TTL)
    }

    #[must_use]
    pub fn with_ttl(
        product_dao: Arc<dyn ProductDao>,
        cache: Arc<dyn ProductCache>,
        ttl: Duration,
    ) -> Self {
        Self {
            product_dao,
            cache,
            ttl,
            write_seq: AtomicU64::new(0),
        }
    }

    /// Component parameters for a repository with the given TTL.
    #[must_use]
    pub fn parameters(ttl: Duration) -> ProductRepositoryImplParameters {
        ProductRepositoryImplParameters {
            ttl,
            write_seq: AtomicU64::new(0),
        }
    }

    fn current_write(&self) -> u64 {
        self.write_seq.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.write_seq.fetch_add(1, Ordering::SeqCst);
    }

    async fn cache_put(&self, product: &Product, operation: &'static str) {
        self.cache
            .insert(product.id.clone(), product.clone(), self.ttl)
            .await;
        CacheMetrics::write(operation);
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryImpl {
    async fn create(&self, id: &ProductId, draft: &ProductDraft) -> CatalogResult<Product> {
        debug!(product_id = %id, product_name = %draft.name, "Repository: create");

        let product = self
            .product_dao
            .insert(id, draft)
            .await
            .map_err(|e| e.into_catalog_error(id, Some(&draft.name)))?;

        self.record_write();
        self.cache_put(&product, "create").await;
        info!(product_id = %id, product_name = %product.name, "Product created");
        Ok(product)
    }

    async fn get(&self, id: &ProductId) -> CatalogResult<Product> {
        if let Some(product) = self.cache.get(id).await {
            CacheMetrics::hit();
            debug!(product_id = %id, "Repository: get served from cache");
            return Ok(product);
        }

        CacheMetrics::miss();
        debug!(product_id = %id, "Repository: get from store");

        let seen = self.current_write();
        let product = self
            .product_dao
            .find_by_id(id)
            .await
            .map_err(|e| e.into_catalog_error(id, None))?;

        if self.current_write() == seen {
            self.cache_put(&product, "get").await;
            if self.current_write() != seen {
                // A writer finished while we were inserting; its own cache
                // step may have run before ours.
                self.cache.remove(id).await;
                debug!(product_id = %id, "Repository: dropped racing read-through");
            }
        }
        Ok(product)
    }

    async fn get_all(&self) -> CatalogResult<Vec<ProductDigest>> {
        debug!("Repository: get_all");

        let products = self
            .product_dao
            .find_all()
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        if products.is_empty() {
            return Err(CatalogError::not_found("product", "all"));
        }
        Ok(products)
    }

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> CatalogResult<Product> {
        debug!(product_id = %id, product_name = %draft.name, "Repository: update");

        let product = self
            .product_dao
            .update(id, draft)
            .await
            .map_err(|e| e.into_catalog_error(id, Some(&draft.name)))?;

        self.record_write();
        self.cache_put(&product, "update").await;
        info!(product_id = %id, "Product updated");
        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
        debug!(product_id = %id, "Repository: delete");

        self.product_dao
            .delete(id)
            .await
            .map_err(|e| e.into_catalog_error(id, None))?;

        self.record_write();
        self.cache.remove(id).await;
        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

impl std::fmt::Debug for ProductRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductRepositoryImpl")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MokaProductCache;
    use crate::dao::InMemoryProductDao;
    use crate::{StoreError, StoreResult};
    use catalog_core::ErrorKind;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use tokio::sync::{Barrier, Notify};

    // =========================================================================
    // Instrumented DAO: counts reads, fails on demand
    // =========================================================================

    #[derive(Default)]
    struct ScriptedDao {
        inner: InMemoryProductDao,
        reads: AtomicUsize,
        failing: AtomicBool,
    }

    impl ScriptedDao {
        fn fail(&self, on: bool) {
            self.failing.store(on, Ordering::SeqCst);
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        fn check(&self) -> StoreResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ProductDao for ScriptedDao {
        async fn insert(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<Product> {
            self.check()?;
            self.inner.insert(id, draft).await
        }

        async fn find_by_id(&self, id: &ProductId) -> StoreResult<Product> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            self.inner.find_by_id(id).await
        }

        async fn find_all(&self) -> StoreResult<Vec<ProductDigest>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            self.inner.find_all().await
        }

        async fn update(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<Product> {
            self.check()?;
            self.inner.update(id, draft).await
        }

        async fn delete(&self, id: &ProductId) -> StoreResult<()> {
            self.check()?;
            self.inner.delete(id).await
        }
    }

    /// Holds the first `find_by_id` after it has read the row, until released.
    #[derive(Default)]
    struct GatedDao {
        inner: InMemoryProductDao,
        armed: AtomicBool,
        read_done: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ProductDao for GatedDao {
        async fn insert(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<Product> {
            self.inner.insert(id, draft).await
        }

        async fn find_by_id(&self, id: &ProductId) -> StoreResult<Product> {
            let found = self.inner.find_by_id(id).await;
            if self.armed.swap(false, Ordering::SeqCst) {
                self.read_done.notify_one();
                self.release.notified().await;
            }
            found
        }

        async fn find_all(&self) -> StoreResult<Vec<ProductDigest>> {
            self.inner.find_all().await
        }

        async fn update(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<Product> {
            self.inner.update(id, draft).await
        }

        async fn delete(&self, id: &ProductId) -> StoreResult<()> {
            self.inner.delete(id).await
        }
    }

    /// Repository over a stored Donut/1000 whose next store read is held.
    async fn gated_repo() -> (Arc<GatedDao>, Arc<ProductRepositoryImpl>, ProductId) {
        let dao = Arc::new(GatedDao::default());
        let id = ProductId::new("a");
        dao.inner.insert(&id, &donut(1000)).await.unwrap();
        dao.armed.store(true, Ordering::SeqCst);

        let repo = Arc::new(ProductRepositoryImpl::new(
            dao.clone(),
            Arc::new(MokaProductCache::default()),
        ));
        (dao, repo, id)
    }

    struct Fixture {
        dao: Arc<ScriptedDao>,
        cache: Arc<MokaProductCache>,
        repo: ProductRepositoryImpl,
    }

    fn fixture() -> Fixture {
        fixture_with_ttl(DEFAULT_TTL)
    }

    fn fixture_with_ttl(ttl: Duration) -> Fixture {
        let dao = Arc::new(ScriptedDao::default());
        let cache = Arc::new(MokaProductCache::default());
        let repo = ProductRepositoryImpl::with_ttl(dao.clone(), cache.clone(), ttl);
        Fixture { dao, cache, repo }
    }

    fn donut(price: i32) -> ProductDraft {
        ProductDraft::new("Donut", price, "Tasty")
    }

    // =========================================================================
    // create
    // =========================================================================

    #[tokio::test]
    async fn test_create_populates_cache() {
        let f = fixture();
        let id = ProductId::new("a");

        let created = f.repo.create(&id, &donut(1000)).await.unwrap();

        assert_eq!(f.cache.get(&id).await, Some(created));
    }

    #[tokio::test]
    async fn test_create_duplicate_name_leaves_cache_untouched() {
        let f = fixture();
        f.repo.create(&ProductId::new("a"), &donut(1000)).await.unwrap();

        let dup = ProductId::new("b");
        let err = f.repo.create(&dup, &donut(5)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert!(err.to_string().contains("Donut"));
        assert!(f.cache.get(&dup).await.is_none());
        assert_eq!(f.cache.entry_count().await, 1);
    }

    #[tokio::test]
    async fn test_create_store_failure_is_internal_and_uncached() {
        let f = fixture();
        f.dao.fail(true);

        let id = ProductId::new("a");
        let err = f.repo.create(&id, &donut(1000)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(f.cache.entry_count().await, 0);
    }

    // =========================================================================
    // get
    // =========================================================================

    #[tokio::test]
    async fn test_get_hit_skips_store() {
        let f = fixture();
        let id = ProductId::new("a");
        f.repo.create(&id, &donut(1000)).await.unwrap();

        let product = f.repo.get(&id).await.unwrap();

        assert_eq!(product.name, "Donut");
        assert_eq!(f.dao.reads(), 0);
    }

    #[tokio::test]
    async fn test_get_miss_reads_through_and_populates() {
        let f = fixture();
        let id = ProductId::new("a");
        f.dao.inner.insert(&id, &donut(1000)).await.unwrap();

        let first = f.repo.get(&id).await.unwrap();
        let second = f.repo.get(&id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(f.dao.reads(), 1);
        assert!(f.cache.get(&id).await.is_some());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found_and_uncached() {
        let f = fixture();
        let id = ProductId::new("missing");

        let err = f.repo.get(&id).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(f.cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_get_store_failure_propagates() {
        let f = fixture();
        f.dao.fail(true);

        let err = f.repo.get(&ProductId::new("a")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_get_after_ttl_goes_back_to_store() {
        let f = fixture_with_ttl(Duration::from_millis(200));
        let id = ProductId::new("a");
        f.repo.create(&id, &donut(1000)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(400)).await;
        f.repo.get(&id).await.unwrap();

        assert_eq!(f.dao.reads(), 1);
    }

    // =========================================================================
    // get_all
    // =========================================================================

    #[tokio::test]
    async fn test_get_all_empty_is_not_found() {
        let f = fixture();
        let err = f.repo.get_all().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_get_all_bypasses_cache() {
        let f = fixture();
        f.repo.create(&ProductId::new("a"), &donut(1000)).await.unwrap();
        f.dao.inner.insert(&ProductId::new("b"), &ProductDraft::new("Bagel", 300, "Chewy")).await.unwrap();

        let all = f.repo.get_all().await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id.as_str(), "a");
        assert_eq!(all[1].name, "Bagel");
        assert_eq!(f.dao.reads(), 1);
        assert_eq!(f.cache.entry_count().await, 1);
    }

    // =========================================================================
    // update
    // =========================================================================

    #[tokio::test]
    async fn test_update_overwrites_cache() {
        let f = fixture();
        let id = ProductId::new("a");
        f.repo.create(&id, &donut(1000)).await.unwrap();

        f.repo.update(&id, &donut(1200)).await.unwrap();

        assert_eq!(f.repo.get(&id).await.unwrap().price, 1200);
        assert_eq!(f.dao.reads(), 0);
    }

    #[tokio::test]
    async fn test_update_populates_cache_when_absent() {
        let f = fixture();
        let id = ProductId::new("a");
        f.dao.inner.insert(&id, &donut(1000)).await.unwrap();

        f.repo.update(&id, &donut(1200)).await.unwrap();

        assert_eq!(f.cache.get(&id).await.unwrap().price, 1200);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_stale_entry() {
        let f = fixture();
        let id = ProductId::new("a");
        f.repo.create(&id, &donut(1000)).await.unwrap();

        f.dao.fail(true);
        let err = f.repo.update(&id, &donut(1200)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(f.cache.get(&id).await.unwrap().price, 1000);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let f = fixture();
        let err = f.repo.update(&ProductId::new("z"), &donut(1)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(f.cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_update_to_taken_name_is_already_exists() {
        let f = fixture();
        f.repo.create(&ProductId::new("a"), &donut(1000)).await.unwrap();
        let bagel = ProductId::new("b");
        f.repo.create(&bagel, &ProductDraft::new("Bagel", 300, "Chewy")).await.unwrap();

        let err = f.repo.update(&bagel, &donut(300)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(f.cache.get(&bagel).await.unwrap().name, "Bagel");
    }

    // =========================================================================
    // delete
    // =========================================================================

    #[tokio::test]
    async fn test_delete_evicts_entry() {
        let f = fixture();
        let id = ProductId::new("a");
        f.repo.create(&id, &donut(1000)).await.unwrap();

        f.repo.delete(&id).await.unwrap();

        assert!(f.cache.get(&id).await.is_none());
        assert_eq!(f.repo.get(&id).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_uncached_row() {
        let f = fixture();
        let id = ProductId::new("a");
        f.dao.inner.insert(&id, &donut(1000)).await.unwrap();

        f.repo.delete(&id).await.unwrap();
        assert!(f.dao.inner.is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_entry() {
        let f = fixture();
        let id = ProductId::new("a");
        f.repo.create(&id, &donut(1000)).await.unwrap();

        f.dao.fail(true);
        assert!(f.repo.delete(&id).await.is_err());
        assert!(f.cache.get(&id).await.is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let f = fixture();
        let err = f.repo.delete(&ProductId::new("z")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    // =========================================================================
    // concurrency
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_creates_same_name() {
        let dao = Arc::new(ScriptedDao::default());
        let cache = Arc::new(MokaProductCache::default());
        let repo = Arc::new(ProductRepositoryImpl::new(dao, cache.clone()));
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = ["a", "b"]
            .into_iter()
            .map(|raw| {
                let repo = Arc::clone(&repo);
                let barrier = Arc::clone(&barrier);
                tokio::spawn(async move {
                    let id = ProductId::new(raw);
                    let draft = donut(1000);
                    barrier.wait().await;
                    repo.create(&id, &draft).await
                })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(e) if e.kind() == ErrorKind::AlreadyExists))
                .count(),
            1
        );
        assert_eq!(cache.entry_count().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_update_during_read_through_is_not_overwritten() {
        let (dao, repo, id) = gated_repo().await;

        let reader = tokio::spawn({
            let repo = Arc::clone(&repo);
            let id = id.clone();
            async move { repo.get(&id).await }
        });
        dao.read_done.notified().await;

        repo.update(&id, &donut(1200)).await.unwrap();
        dao.release.notify_one();

        // The held read may still report the row it saw.
        assert_eq!(reader.await.unwrap().unwrap().price, 1000);
        assert_eq!(repo.get(&id).await.unwrap().price, 1200);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_delete_during_read_through_is_not_resurrected() {
        let (dao, repo, id) = gated_repo().await;

        let reader = tokio::spawn({
            let repo = Arc::clone(&repo);
            let id = id.clone();
            async move { repo.get(&id).await }
        });
        dao.read_done.notified().await;

        repo.delete(&id).await.unwrap();
        dao.release.notify_one();

        reader.await.unwrap().unwrap();
        assert_eq!(repo.get(&id).await.unwrap_err().kind(), ErrorKind::NotFound);
    }
}
