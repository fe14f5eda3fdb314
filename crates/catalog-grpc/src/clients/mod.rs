//! Remote clients for calling the catalog over gRPC.

mod product_client;

pub use product_client::*;
