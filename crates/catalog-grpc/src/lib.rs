//! # Catalog gRPC
//!
//! gRPC transport for the product catalog using Tonic.
//! Validates request arguments, calls the product service and maps the
//! three error kinds onto gRPC status codes. Also ships the standard
//! health service and a typed client for remote callers.

pub mod clients;
pub mod proto;
pub mod server;
pub mod services;

pub use clients::*;
pub use server::*;
pub use services::*;
