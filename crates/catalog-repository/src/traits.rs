//! Repository trait definitions.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, Product, ProductDigest, ProductDraft, ProductId};

/// Product repository trait.
///
/// Errors are already classified: `NotFound` and `AlreadyExists` for the
/// two recognized conditions, everything else surfaces as an
/// `Internal`-kind error.
#[async_trait]
pub trait ProductRepository: Interface + Send + Sync {
    /// Stores a new product under a pre-assigned id.
    async fn create(&self, id: &ProductId, draft: &ProductDraft) -> CatalogResult<Product>;

    /// Finds a product by ID.
    async fn get(&self, id: &ProductId) -> CatalogResult<Product>;

    /// Lists all products, `NotFound` when there are none.
    async fn get_all(&self) -> CatalogResult<Vec<ProductDigest>>;

    /// Overwrites an existing product.
    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> CatalogResult<Product>;

    /// Deletes a product by ID.
    async fn delete(&self, id: &ProductId) -> CatalogResult<()>;
}
