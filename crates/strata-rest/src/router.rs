//! Main application router.

use crate::{
    controllers::{health_controller, metrics_controller, order_controller, product_controller},
    middleware::logging_middleware,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use strata_config::{ObservabilityConfig, ServerConfig};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Creates the main application router.
///
/// Products live under `/products` and orders under `/api/orders`.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/products", product_controller::router())
        .nest("/api/orders", order_controller::router())
        .route("/", get(root))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with product, order and health endpoints");
    router
}

/// Mounts the Prometheus scrape endpoint when metrics are enabled.
pub fn with_metrics(
    router: Router,
    observability: &ObservabilityConfig,
    handle: Option<PrometheusHandle>,
) -> Router {
    match handle {
        Some(handle) if observability.metrics_enabled => {
            info!("Metrics exposed at {}", observability.metrics_path);
            router.merge(metrics_controller::router(&observability.metrics_path, handle))
        }
        _ => router,
    }
}

/// Creates a CORS layer based on server configuration.
///
/// A `"*"` entry allows any origin; otherwise only the listed origins are
/// echoed back. Entries that are not valid header values are skipped.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }
    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Strata API v1"
}
