//! Domain entities of the product catalog.

pub mod product;

pub use product::*;
