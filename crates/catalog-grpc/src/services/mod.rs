//! gRPC service implementations.

mod health_service;
mod product_service;

pub use health_service::*;
pub use product_service::*;
