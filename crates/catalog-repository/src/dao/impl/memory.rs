//! In-process product DAO.
//!
//! Mirrors the PostgreSQL table semantics (unique names, ordered listing,
//! store-assigned `created_at`) without a database. Selected with the
//! `memory://` database URL and used throughout the test suites.

use crate::{dao::ProductDao, StoreError, StoreResult};
use async_trait::async_trait;
use catalog_core::{Product, ProductDigest, ProductDraft, ProductId};
use chrono::Utc;
use parking_lot::RwLock;
use shaku::Component;
use std::collections::BTreeMap;

/// Product DAO backed by an ordered map.
#[derive(Component, Default)]
#[shaku(interface = ProductDao)]
pub struct InMemoryProductDao {
    #[shaku(default)]
    rows: RwLock<BTreeMap<ProductId, Product>>,
}

impl InMemoryProductDao {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    fn name_taken(rows: &BTreeMap<ProductId, Product>, name: &str, except: Option<&ProductId>) -> bool {
        rows.values()
            .any(|p| p.name == name && Some(&p.id) != except)
    }
}

#[async_trait]
impl ProductDao for InMemoryProductDao {
    async fn insert(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<Product> {
        let mut rows = self.rows.write();
        if rows.contains_key(id) || Self::name_taken(&rows, &draft.name, None) {
            return Err(StoreError::UniqueViolation);
        }

        let product = Product::from_draft(id.clone(), draft.clone(), Utc::now());
        rows.insert(id.clone(), product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> StoreResult<Product> {
        self.rows.read().get(id).cloned().ok_or(StoreError::NotFound)
    }

    async fn find_all(&self) -> StoreResult<Vec<ProductDigest>> {
        Ok(self.rows.read().values().map(Product::digest).collect())
    }

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<Product> {
        let mut rows = self.rows.write();
        if !rows.contains_key(id) {
            return Err(StoreError::NotFound);
        }
        if Self::name_taken(&rows, &draft.name, Some(id)) {
            return Err(StoreError::UniqueViolation);
        }

        let row = rows.get_mut(id).ok_or(StoreError::NotFound)?;
        row.name.clone_from(&draft.name);
        row.price = draft.price;
        row.description.clone_from(&draft.description);
        Ok(row.clone())
    }

    async fn delete(&self, id: &ProductId) -> StoreResult<()> {
        self.rows
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

impl std::fmt::Debug for InMemoryProductDao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryProductDao")
            .field("rows", &self.len())
            .finish()
    }
}
