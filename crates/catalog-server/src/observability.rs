//! Logging and metrics initialisation.

use catalog_config::{LogFormat, ObservabilityConfig};
use catalog_core::{CatalogError, CatalogResult};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &ObservabilityConfig) -> CatalogResult<()> {
    match config.log_format {
        LogFormat::Pretty => init_with_layer(
            config,
            tracing_subscriber::fmt::layer().with_target(true),
        ),
        LogFormat::Json => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true),
        ),
    }
}

fn init_with_layer<L>(config: &ObservabilityConfig, fmt_layer: L) -> CatalogResult<()>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_env_filter(config))
        .try_init()
        .map_err(|e| CatalogError::Configuration(format!("Failed to initialise logging: {e}")))
}

/// Default filter: the configured level, with chatty transport crates at `warn`.
#[must_use]
pub fn build_env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(config)))
}

fn default_directives(config: &ObservabilityConfig) -> String {
    format!("{},h2=warn,hyper=warn,tower=warn,sqlx=warn", config.log_level)
}

/// Starts the Prometheus exporter when enabled and describes the cache counters.
///
/// Returns the listen address, or `None` when metrics are disabled.
pub fn init_metrics(config: &ObservabilityConfig) -> CatalogResult<Option<SocketAddr>> {
    if !config.metrics_enabled {
        return Ok(None);
    }

    let addr: SocketAddr = config.metrics_addr.parse().map_err(|e| {
        CatalogError::Configuration(format!("Invalid metrics address: {e}"))
    })?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| CatalogError::Configuration(format!("Failed to install metrics exporter: {e}")))?;

    catalog_repository::metrics::register_metrics();
    info!("Prometheus metrics exposed on http://{}/metrics", addr);

    Ok(Some(addr))
}
