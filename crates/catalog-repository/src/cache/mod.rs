//! Per-instance product cache.
//!
//! The cache is a plain TTL key/value store; deciding when to read or
//! write it is the job of [`ProductRepositoryImpl`](crate::ProductRepositoryImpl).

mod moka_cache;
mod product_cache;

pub use moka_cache::{MokaProductCache, MokaProductCacheParameters, DEFAULT_CAPACITY};
pub use product_cache::ProductCache;
