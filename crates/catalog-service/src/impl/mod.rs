//! Product service implementations.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `product_service.rs`).

pub mod product_service_impl;

pub use product_service_impl::{ProductServiceComponent, ProductServiceImpl, SERVICE_NAME};
