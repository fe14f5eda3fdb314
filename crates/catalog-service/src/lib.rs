//! # Catalog Service
//!
//! Orchestration layer for the product catalog: assigns identifiers and
//! classifies failures before they reach the transport.

pub mod product_service;
pub mod r#impl;

pub use product_service::*;
pub use r#impl::*;
