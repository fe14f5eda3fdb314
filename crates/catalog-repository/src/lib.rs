//! # Catalog Repository
//!
//! Four-layer data access hierarchy with a per-instance cache:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository>  (domain interface)
//! ProductRepositoryImpl            (store first, cache second)
//!   ↓  Arc<dyn ProductDao>         ↘ Arc<dyn ProductCache>
//! PostgresProductDao                 MokaProductCache
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs                       ← ProductRepository trait
//!   error.rs                        ← StoreError (DAO seam)
//!   impl/
//!     product_repository_impl.rs    ← ProductRepositoryImpl
//!   dao/
//!     product_dao.rs                ← ProductDao trait
//!     impl/
//!       postgres.rs                 ← PostgresProductDao
//!       memory.rs                   ← InMemoryProductDao
//!   cache/
//!     product_cache.rs              ← ProductCache trait
//!     moka_cache.rs                 ← MokaProductCache
//! ```

pub mod cache;
pub mod dao;
pub mod error;
pub mod metrics;
pub mod pool;
pub mod traits;
pub mod r#impl;

pub use cache::{MokaProductCache, ProductCache};
pub use dao::{InMemoryProductDao, PostgresProductDao, ProductDao};
pub use error::{StoreError, StoreResult};
pub use pool::*;
pub use traits::*;
pub use r#impl::{ProductRepositoryImpl, DEFAULT_TTL};
