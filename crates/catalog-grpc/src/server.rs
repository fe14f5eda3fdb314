//! gRPC server setup.

use crate::proto::{health, product};
use crate::services::{HealthServiceImpl, ProductGrpcService};
use catalog_config::ServerConfig;
use catalog_core::{CatalogError, CatalogResult};
use catalog_service::ProductService;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::server::Router;
use tonic::transport::Server;
use tracing::info;

/// gRPC server exposing the product service and health checks.
pub struct GrpcServer {
    addr: SocketAddr,
    request_timeout: Duration,
    product_service: Arc<dyn ProductService>,
}

impl GrpcServer {
    /// Creates a new gRPC server.
    pub fn new(
        config: &ServerConfig,
        product_service: Arc<dyn ProductService>,
    ) -> CatalogResult<Self> {
        let addr = config.grpc_addr().parse().map_err(|e| {
            CatalogError::Configuration(format!("Invalid gRPC address: {e}"))
        })?;

        Ok(Self {
            addr,
            request_timeout: config.request_timeout(),
            product_service,
        })
    }

    /// Address the server binds to in [`serve_with_shutdown`](Self::serve_with_shutdown).
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn router(self) -> Router {
        let health_service = HealthServiceImpl::new();
        let product_grpc_service = ProductGrpcService::new(self.product_service);

        Server::builder()
            .timeout(self.request_timeout)
            .add_service(health::health_server::HealthServer::new(health_service))
            .add_service(product::product_service_server::ProductServiceServer::new(
                product_grpc_service,
            ))
    }

    /// Serves on the configured address until `signal` resolves.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> CatalogResult<()>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = self.addr;
        info!("Starting gRPC server on {}", addr);

        self.router()
            .serve_with_shutdown(addr, signal)
            .await
            .map_err(|e| CatalogError::Transport(format!("gRPC server error: {e}")))?;

        info!("gRPC server stopped");
        Ok(())
    }

    /// Serves on an already bound listener until `signal` resolves.
    pub async fn serve_with_listener<F>(self, listener: TcpListener, signal: F) -> CatalogResult<()>
    where
        F: Future<Output = ()> + Send,
    {
        if let Ok(local) = listener.local_addr() {
            info!("Starting gRPC server on {}", local);
        }

        self.router()
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), signal)
            .await
            .map_err(|e| CatalogError::Transport(format!("gRPC server error: {e}")))?;

        Ok(())
    }
}
