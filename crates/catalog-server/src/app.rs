//! Application builder and lifecycle.

use crate::di::{CatalogModule, ServiceResolver};
use catalog_config::AppConfig;
use catalog_core::CatalogResult;
use catalog_grpc::GrpcServer;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    #[must_use]
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Wires the DI module for the configured store.
    pub async fn build(self) -> CatalogResult<App> {
        let config = self.config.unwrap_or_default();
        let module = CatalogModule::from_config(&config).await?;
        Ok(App { config, module })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A wired application ready to serve.
pub struct App {
    config: AppConfig,
    module: CatalogModule,
}

impl App {
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub const fn module(&self) -> &CatalogModule {
        &self.module
    }

    /// Serves on the configured address until `signal` resolves, then
    /// closes the pool.
    pub async fn run<F>(self, signal: F) -> CatalogResult<()>
    where
        F: Future<Output = ()> + Send,
    {
        let server = GrpcServer::new(&self.config.server, self.module.product_service())?;
        let result = server.serve_with_shutdown(signal).await;
        self.shutdown().await;
        result
    }

    /// Serves on an already bound listener until `signal` resolves.
    pub async fn run_with_listener<F>(self, listener: TcpListener, signal: F) -> CatalogResult<()>
    where
        F: Future<Output = ()> + Send,
    {
        let server = GrpcServer::new(&self.config.server, self.module.product_service())?;
        let result = server.serve_with_listener(listener, signal).await;
        self.shutdown().await;
        result
    }

    async fn shutdown(&self) {
        if let Some(pool) = self.module.database_pool() {
            pool.close().await;
            info!("Database pool closed");
        }
    }
}
