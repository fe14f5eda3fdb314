//! PostgreSQL product DAO.

use crate::{dao::ProductDao, DatabasePoolInterface, StoreError, StoreResult};
use async_trait::async_trait;
use catalog_core::{Product, ProductDigest, ProductDraft, ProductId};
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const INSERT_PRODUCT_SQL: &str = r#"
    INSERT INTO products (id, name, price, description)
    VALUES ($1, $2, $3, $4)
    RETURNING id, name, price, description, created_at
"#;

const FIND_PRODUCT_SQL: &str = r#"
    SELECT id, name, price, description, created_at
    FROM products
    WHERE id = $1
"#;

const LIST_PRODUCTS_SQL: &str = r#"
    SELECT id, name, price
    FROM products
    ORDER BY id
"#;

const UPDATE_PRODUCT_SQL: &str = r#"
    UPDATE products
    SET name = $2, price = $3, description = $4, updated_at = now()
    WHERE id = $1
    RETURNING id, name, price, description, created_at
"#;

const DELETE_PRODUCT_SQL: &str = "DELETE FROM products WHERE id = $1";

/// PostgreSQL-backed product DAO.
#[derive(Component, Clone)]
#[shaku(interface = ProductDao)]
pub struct PostgresProductDao {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PostgresProductDao {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: i32,
    description: String,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct DigestRow {
    id: String,
    name: String,
    price: i32,
}

impl From<DigestRow> for ProductDigest {
    fn from(row: DigestRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
        }
    }
}

#[async_trait]
impl ProductDao for PostgresProductDao {
    async fn insert(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<Product> {
        debug!(product_id = %id, product_name = %draft.name, "Inserting product");

        let row = sqlx::query_as::<_, ProductRow>(INSERT_PRODUCT_SQL)
            .bind(id.as_str())
            .bind(&draft.name)
            .bind(draft.price)
            .bind(&draft.description)
            .fetch_one(self.pool.inner())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &ProductId) -> StoreResult<Product> {
        debug!(product_id = %id, "Finding product by id");

        let row = sqlx::query_as::<_, ProductRow>(FIND_PRODUCT_SQL)
            .bind(id.as_str())
            .fetch_one(self.pool.inner())
            .await?;

        Ok(row.into())
    }

    async fn find_all(&self) -> StoreResult<Vec<ProductDigest>> {
        debug!("Listing products");

        let rows = sqlx::query_as::<_, DigestRow>(LIST_PRODUCTS_SQL)
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> StoreResult<Product> {
        debug!(product_id = %id, product_name = %draft.name, "Updating product");

        let row = sqlx::query_as::<_, ProductRow>(UPDATE_PRODUCT_SQL)
            .bind(id.as_str())
            .bind(&draft.name)
            .bind(draft.price)
            .bind(&draft.description)
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Into::into).ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: &ProductId) -> StoreResult<()> {
        debug!(product_id = %id, "Deleting product");

        let result = sqlx::query(DELETE_PRODUCT_SQL)
            .bind(id.as_str())
            .execute(self.pool.inner())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

impl std::fmt::Debug for PostgresProductDao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresProductDao").finish_non_exhaustive()
    }
}
