//! Product entity and its input/listing shapes.

use crate::validation::rules::not_blank;
use crate::ProductId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Durable product entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier assigned once at creation.
    pub id: ProductId,

    /// Display name, unique across the catalog.
    pub name: String,

    /// Price in minor units, always positive.
    pub price: i32,

    pub description: String,

    /// Set by the store on insertion.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Builds a product from a draft and store-assigned metadata.
    #[must_use]
    pub fn from_draft(id: ProductId, draft: ProductDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            description: draft.description,
            created_at,
        }
    }

    /// Listing summary of this product.
    #[must_use]
    pub fn digest(&self) -> ProductDigest {
        ProductDigest {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
        }
    }
}

/// Caller-supplied values for create and full-overwrite update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProductDraft {
    #[validate(custom(function = "not_blank"))]
    pub name: String,

    #[validate(range(min = 1))]
    pub price: i32,

    #[validate(custom(function = "not_blank"))]
    pub description: String,
}

impl ProductDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, price: i32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            description: description.into(),
        }
    }
}

/// Read-only listing summary, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDigest {
    pub id: ProductId,
    pub name: String,
    pub price: i32,
}
