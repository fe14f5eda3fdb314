//! # Catalog Server
//!
//! Main entry point: loads configuration, sets up logging and metrics,
//! wires the DI module and serves gRPC until Ctrl+C or SIGTERM.

use catalog_config::ConfigLoader;
use catalog_core::CatalogResult;
use catalog_server::app::AppBuilder;
use catalog_server::observability::{init_logging, init_metrics};
use catalog_server::startup::{print_banner, print_startup_info, shutdown_signal};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Logging may not be up yet when configuration fails.
        eprintln!("Application error: {e}");
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> CatalogResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_logging(&config.observability)?;
    print_banner();

    info!("Starting {} server...", config.app.name);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let metrics_addr = init_metrics(&config.observability)?;

    let store = if config.database.is_in_memory() {
        "memory"
    } else {
        "postgres"
    };
    let grpc_addr = config.server.grpc_addr();

    let app = AppBuilder::new().with_config(config).build().await?;
    print_startup_info(&grpc_addr, store, metrics_addr);

    app.run(shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}
