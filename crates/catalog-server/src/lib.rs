//! # Catalog Server Library
//!
//! Process wiring for the product catalog: dependency injection modules,
//! logging and metrics setup, and the server lifecycle.

pub mod app;
pub mod di;
pub mod observability;
pub mod startup;
