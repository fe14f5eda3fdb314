//! DAO implementations.
//!
//! Trait definitions live in the parent `dao/` module (e.g. `product_dao.rs`).
//! Implementations are organized by technology.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductDao;
pub use postgres::PostgresProductDao;
