//! Product service implementations.

use crate::product_service::ProductService;
use async_trait::async_trait;
use catalog_core::{
    CatalogResult, IdGenerator, LogContext, Product, ProductDigest, ProductDraft, ProductId,
};
use catalog_repository::ProductRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Service name recorded in the log context of wrapped failures.
pub const SERVICE_NAME: &str = "product-service";

/// Generic product service implementation (non-DI).
pub struct ProductServiceImpl<R: ProductRepository + ?Sized, G: IdGenerator + ?Sized> {
    product_repository: Arc<R>,
    id_generator: Arc<G>,
}

impl<R: ProductRepository + ?Sized, G: IdGenerator + ?Sized> ProductServiceImpl<R, G> {
    /// Creates a new product service.
    pub fn new(product_repository: Arc<R>, id_generator: Arc<G>) -> Self {
        Self {
            product_repository,
            id_generator,
        }
    }
}

#[async_trait]
impl<R, G> ProductService for ProductServiceImpl<R, G>
where
    R: ProductRepository + ?Sized + 'static,
    G: IdGenerator + ?Sized + 'static,
{
    async fn create(&self, draft: ProductDraft) -> CatalogResult<ProductId> {
        debug!(product_name = %draft.name, "Creating product");

        let context = LogContext::new(SERVICE_NAME).with_product_name(&draft.name);

        let id = self
            .id_generator
            .new_id()
            .map_err(|e| e.into_internal(context.clone()))?;

        let context = context.with_product_id(id.as_str());
        self.product_repository
            .create(&id, &draft)
            .await
            .map_err(|e| e.into_internal(context))?;

        info!(product_id = %id, product_name = %draft.name, "Product created");
        Ok(id)
    }

    async fn get(&self, id: &ProductId) -> CatalogResult<Product> {
        debug!(product_id = %id, "Getting product");
        self.product_repository.get(id).await
    }

    async fn get_all(&self) -> CatalogResult<Vec<ProductDigest>> {
        debug!("Listing products");
        self.product_repository.get_all().await
    }

    async fn update(&self, id: &ProductId, draft: ProductDraft) -> CatalogResult<()> {
        debug!(product_id = %id, product_name = %draft.name, "Updating product");
        self.product_repository.update(id, &draft).await?;
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
        debug!(product_id = %id, "Deleting product");
        self.product_repository.delete(id).await
    }
}

/// Shaku-compatible product service component.
///
/// Resolves its repository and id generator from the DI module and runs
/// the same orchestration as [`ProductServiceImpl`].
#[derive(Component)]
#[shaku(interface = ProductService)]
pub struct ProductServiceComponent {
    #[shaku(inject)]
    product_repository: Arc<dyn ProductRepository>,
    #[shaku(inject)]
    id_generator: Arc<dyn IdGenerator>,
}

impl ProductServiceComponent {
    fn orchestrator(&self) -> ProductServiceImpl<dyn ProductRepository, dyn IdGenerator> {
        ProductServiceImpl::new(
            Arc::clone(&self.product_repository),
            Arc::clone(&self.id_generator),
        )
    }
}

#[async_trait]
impl ProductService for ProductServiceComponent {
    async fn create(&self, draft: ProductDraft) -> CatalogResult<ProductId> {
        self.orchestrator().create(draft).await
    }

    async fn get(&self, id: &ProductId) -> CatalogResult<Product> {
        self.orchestrator().get(id).await
    }

    async fn get_all(&self) -> CatalogResult<Vec<ProductDigest>> {
        self.orchestrator().get_all().await
    }

    async fn update(&self, id: &ProductId, draft: ProductDraft) -> CatalogResult<()> {
        self.orchestrator().update(id, draft).await
    }

    async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
        self.orchestrator().delete(id).await
    }
}

impl std::fmt::Debug for ProductServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceComponent").finish_non_exhaustive()
    }
}
