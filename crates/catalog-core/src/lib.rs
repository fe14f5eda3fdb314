//! # Catalog Core
//!
//! Core types, traits, and error definitions for the product catalog.
//! Every other crate in the workspace speaks the vocabulary defined here:
//! the product entities, the typed product identifier, and the three-kind
//! error taxonomy that crosses every layer boundary.

pub mod domain;
pub mod error;
pub mod id;
pub mod log_context;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use log_context::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
