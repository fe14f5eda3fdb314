//! ProductDao trait: low-level product data access.
//!
//! Implementations connect directly to a single data source and report
//! failures as [`StoreError`]. [`ProductRepository`] uses a `ProductDao`
//! together with a cache to fulfil domain-level operations.
//!
//! [`ProductRepository`]: crate::traits::ProductRepository

use crate::StoreResult;
use async_trait::async_trait;
use catalog_core::{Interface, Product, ProductDigest, ProductDraft, ProductId};

/// Low-level product data access object.
///
/// The store owns name uniqueness and the `created_at` timestamp.
#[async_trait]
pub trait ProductDao: Interface + Send + Sync {
    /// Inserts a new row and returns it as stored.
    async fn insert(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<Product>;

    /// Finds a product by ID, `StoreError::NotFound` when absent.
    async fn find_by_id(&self, id: &ProductId) -> StoreResult<Product>;

    /// Lists every product ordered by id.
    async fn find_all(&self) -> StoreResult<Vec<ProductDigest>>;

    /// Overwrites name, price and description of an existing row.
    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<Product>;

    /// Deletes a row, `StoreError::NotFound` when nothing was deleted.
    async fn delete(&self, id: &ProductId) -> StoreResult<()>;
}
