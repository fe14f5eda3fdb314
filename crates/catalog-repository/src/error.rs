//! Store-level errors at the DAO seam.

use catalog_core::{CatalogError, ProductId};
use sqlx::error::ErrorKind;
use thiserror::Error;

/// PostgreSQL SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Failures reported by a [`ProductDao`](crate::dao::ProductDao).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A row with the same unique name already exists.
    #[error("unique constraint violated")]
    UniqueViolation,

    /// No row matched the given id.
    #[error("row not found")]
    NotFound,

    #[error("storage error: {0}")]
    Database(#[source] sqlx::Error),
}

/// A specialized `Result` type for DAO operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }

        let unique = error.as_database_error().is_some_and(|db| {
            matches!(db.kind(), ErrorKind::UniqueViolation)
                || db.code().as_deref() == Some(UNIQUE_VIOLATION)
        });

        if unique {
            Self::UniqueViolation
        } else {
            Self::Database(error)
        }
    }
}

impl StoreError {
    /// Reclassifies into the domain taxonomy for the product `id`/`name`.
    ///
    /// A uniqueness violation without a known name reports the id instead.
    #[must_use]
    pub fn into_catalog_error(self, id: &ProductId, name: Option<&str>) -> CatalogError {
        match self {
            Self::UniqueViolation => {
                CatalogError::already_exists(name.unwrap_or_else(|| id.as_str()))
            }
            Self::NotFound => CatalogError::not_found("product", id),
            Self::Database(e) => CatalogError::Database(e.to_string()),
        }
    }
}
