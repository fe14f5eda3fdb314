//! Generated protobuf types and service stubs.

/// Product catalog messages and the `ProductService` stubs.
pub mod product {
    tonic::include_proto!("catalog.product.v1");
}

/// Standard gRPC health checking protocol.
pub mod health {
    tonic::include_proto!("grpc.health.v1");
}
