//! Prometheus scrape endpoint.

use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;

/// Creates a router serving the rendered metrics at `path`.
pub fn router(path: &str, handle: PrometheusHandle) -> Router {
    Router::new().route(path, get(move || std::future::ready(handle.render())))
}
