//! Dependency injection module using Shaku.
//!
//! Two modules share the same repository, cache and service components and
//! differ only in the store:
//! - `PostgresCatalogModule`: PostgreSQL pool and DAO
//! - `InMemoryCatalogModule`: process-local store for tests and local runs

use catalog_config::AppConfig;
use catalog_core::{CatalogResult, UuidV7Generator};
use catalog_repository::{
    DatabasePool, DatabasePoolInterface, InMemoryProductDao, MokaProductCache, PostgresProductDao,
    ProductCache, ProductRepository, ProductRepositoryImpl,
};
use catalog_service::{ProductService, ProductServiceComponent};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Shaku Module Definitions
// ============================================================================

module! {
    pub PostgresCatalogModule {
        components = [
            DatabasePool,
            PostgresProductDao,
            MokaProductCache,
            ProductRepositoryImpl,
            UuidV7Generator,
            ProductServiceComponent,
        ],
        providers = [],
    }
}

module! {
    pub InMemoryCatalogModule {
        components = [
            InMemoryProductDao,
            MokaProductCache,
            ProductRepositoryImpl,
            UuidV7Generator,
            ProductServiceComponent,
        ],
        providers = [],
    }
}

// ============================================================================
// Module Builders
// ============================================================================

/// Builds the PostgreSQL-backed module.
///
/// Connects the pool and, when configured, applies pending migrations.
pub async fn build_postgres_module(config: &AppConfig) -> CatalogResult<Arc<PostgresCatalogModule>> {
    let db_pool = DatabasePool::connect(&config.database).await?;

    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let module = PostgresCatalogModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePool::parameters(
            db_pool.inner().clone(),
        ))
        .with_component_parameters::<MokaProductCache>(MokaProductCache::parameters(
            config.cache.max_capacity,
        ))
        .with_component_parameters::<ProductRepositoryImpl>(ProductRepositoryImpl::parameters(
            config.cache.ttl(),
        ))
        .build();

    Ok(Arc::new(module))
}

/// Builds the module backed by the in-process store.
#[must_use]
pub fn build_in_memory_module(config: &AppConfig) -> Arc<InMemoryCatalogModule> {
    let module = InMemoryCatalogModule::builder()
        .with_component_parameters::<MokaProductCache>(MokaProductCache::parameters(
            config.cache.max_capacity,
        ))
        .with_component_parameters::<ProductRepositoryImpl>(ProductRepositoryImpl::parameters(
            config.cache.ttl(),
        ))
        .build();

    Arc::new(module)
}

// ============================================================================
// Module Resolution Helpers
// ============================================================================

/// Trait for resolving the catalog components from any module.
pub trait ServiceResolver {
    fn product_service(&self) -> Arc<dyn ProductService>;

    fn product_repository(&self) -> Arc<dyn ProductRepository>;

    fn product_cache(&self) -> Arc<dyn ProductCache>;
}

impl ServiceResolver for PostgresCatalogModule {
    fn product_service(&self) -> Arc<dyn ProductService> {
        self.resolve()
    }

    fn product_repository(&self) -> Arc<dyn ProductRepository> {
        self.resolve()
    }

    fn product_cache(&self) -> Arc<dyn ProductCache> {
        self.resolve()
    }
}

impl ServiceResolver for InMemoryCatalogModule {
    fn product_service(&self) -> Arc<dyn ProductService> {
        self.resolve()
    }

    fn product_repository(&self) -> Arc<dyn ProductRepository> {
        self.resolve()
    }

    fn product_cache(&self) -> Arc<dyn ProductCache> {
        self.resolve()
    }
}

/// The module selected by configuration.
#[derive(Clone)]
pub enum CatalogModule {
    Postgres(Arc<PostgresCatalogModule>),
    InMemory(Arc<InMemoryCatalogModule>),
}

impl CatalogModule {
    /// Builds the module named by `database.url`.
    pub async fn from_config(config: &AppConfig) -> CatalogResult<Self> {
        if config.database.is_in_memory() {
            info!("Using in-memory product store");
            Ok(Self::InMemory(build_in_memory_module(config)))
        } else {
            Ok(Self::Postgres(build_postgres_module(config).await?))
        }
    }

    /// The pool, when the module is backed by PostgreSQL.
    #[must_use]
    pub fn database_pool(&self) -> Option<Arc<dyn DatabasePoolInterface>> {
        match self {
            Self::Postgres(module) => Some(module.resolve()),
            Self::InMemory(_) => None,
        }
    }
}

impl ServiceResolver for CatalogModule {
    fn product_service(&self) -> Arc<dyn ProductService> {
        match self {
            Self::Postgres(module) => module.product_service(),
            Self::InMemory(module) => module.product_service(),
        }
    }

    fn product_repository(&self) -> Arc<dyn ProductRepository> {
        match self {
            Self::Postgres(module) => module.product_repository(),
            Self::InMemory(module) => module.product_repository(),
        }
    }

    fn product_cache(&self) -> Arc<dyn ProductCache> {
        match self {
            Self::Postgres(module) => module.product_cache(),
            Self::InMemory(module) => module.product_cache(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{ErrorKind, ProductDraft};
    use std::time::Duration;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = "memory://".to_string();
        config
    }

    #[test]
    fn test_module_types_exist() {
        fn _assert_resolver<T: ServiceResolver>() {}
        fn _assert_has_pool<T: HasComponent<dyn DatabasePoolInterface>>() {}

        _assert_resolver::<PostgresCatalogModule>();
        _assert_resolver::<InMemoryCatalogModule>();
        _assert_resolver::<CatalogModule>();
        _assert_has_pool::<PostgresCatalogModule>();
    }

    #[tokio::test]
    async fn test_in_memory_module_shares_components() {
        let module = build_in_memory_module(&memory_config());

        let service = module.product_service();
        let cache = module.product_cache();

        let id = service.create(ProductDraft::new("Donut", 1000, "Tasty")).await.unwrap();
        assert!(cache.get(&id).await.is_some());

        // Same singleton repository behind every resolution.
        let found = module.product_repository().get(&id).await.unwrap();
        assert_eq!(found.name, "Donut");
    }

    #[tokio::test]
    async fn test_in_memory_module_uses_configured_ttl() {
        let mut config = memory_config();
        config.cache.ttl_secs = 1;
        let module = build_in_memory_module(&config);

        let id = module
            .product_service()
            .create(ProductDraft::new("Donut", 1000, "Tasty"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(1300)).await;

        assert!(module.product_cache().get(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_from_config_selects_in_memory() {
        let module = CatalogModule::from_config(&memory_config()).await.unwrap();

        assert!(matches!(module, CatalogModule::InMemory(_)));
        assert!(module.database_pool().is_none());
        assert_eq!(
            module.product_service().get_all().await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
