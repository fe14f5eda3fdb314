//! Product service trait definition.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, Product, ProductDigest, ProductDraft, ProductId};

/// Product orchestration service.
///
/// Callers only ever observe `NotFound`, `AlreadyExists` or an
/// `Internal`-kind error.
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Creates a product and returns its freshly minted id.
    async fn create(&self, draft: ProductDraft) -> CatalogResult<ProductId>;

    /// Gets a product by ID.
    async fn get(&self, id: &ProductId) -> CatalogResult<Product>;

    /// Lists all products.
    async fn get_all(&self) -> CatalogResult<Vec<ProductDigest>>;

    /// Replaces name, price and description of a product.
    async fn update(&self, id: &ProductId, draft: ProductDraft) -> CatalogResult<()>;

    /// Deletes a product.
    async fn delete(&self, id: &ProductId) -> CatalogResult<()>;
}
