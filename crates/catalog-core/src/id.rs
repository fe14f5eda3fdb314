//! Typed product identifier and its generator.

use crate::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use shaku::{Component, Interface};
use std::fmt::{self, Display};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// A strongly-typed wrapper for product IDs.
///
/// The value is opaque to every layer except the generator; it is stored
/// and transported as the hyphenated lowercase text of a UUIDv7.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<Uuid> for ProductId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Source of fresh product identifiers.
pub trait IdGenerator: Interface {
    /// Mints a new identifier, later calls sort after earlier ones.
    fn new_id(&self) -> CatalogResult<ProductId>;
}

/// UUIDv7 generator backed by the system clock.
#[derive(Component, Default)]
#[shaku(interface = IdGenerator)]
pub struct UuidV7Generator {}

impl UuidV7Generator {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl IdGenerator for UuidV7Generator {
    fn new_id(&self) -> CatalogResult<ProductId> {
        since_epoch(SystemTime::now())?;
        Ok(ProductId::from(Uuid::now_v7()))
    }
}

fn since_epoch(now: SystemTime) -> CatalogResult<Duration> {
    now.duration_since(UNIX_EPOCH)
        .map_err(|e| CatalogError::IdGeneration(format!("system clock before unix epoch: {e}")))
}
