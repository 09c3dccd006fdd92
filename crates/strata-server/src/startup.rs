//! Server startup utilities.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use strata_config::AppConfig;
use strata_core::{StrataError, StrataResult};
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
       _             _
   ___| |_ _ __ __ _| |_ __ _
  / __| __| '__/ _` | __/ _` |
  \__ \ |_| | | (_| | || (_| |
  |___/\__|_|  \__,_|\__\__,_|
"#
    );
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let addr = config.server.addr();
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Products:  http://{}/products", addr);
    info!("Orders:    http://{}/api/orders", addr);
    info!("Health:    http://{}/health", addr);
    if config.observability.metrics_enabled {
        info!("Metrics:   http://{}{}", addr, config.observability.metrics_path);
    }
    info!(
        "Cache:     {} (cache-aside TTL {}s, write-through TTL {})",
        if config.redis.enabled { "redis" } else { "in-memory" },
        config.cache.cache_aside_ttl_secs,
        config
            .cache
            .write_through_ttl_secs
            .map_or_else(|| "none".to_string(), |ttl| format!("{ttl}s")),
    );
    info!("{}", separator);
}

/// Installs the global Prometheus recorder when metrics are enabled.
pub fn install_metrics(config: &AppConfig) -> StrataResult<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| StrataError::Configuration(format!("Failed to install metrics recorder: {}", e)))?;
    strata_service::metrics::register_metrics();

    Ok(Some(handle))
}
