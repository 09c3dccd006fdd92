//! Request logging middleware.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

/// Logs one line per request with its route, status and latency.
///
/// Server errors are logged at `warn` so store outages stand out.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path().to_string(), |p| p.as_str().to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        warn!(target: "http", %method, %route, status, elapsed_ms, "HTTP request failed");
    } else {
        info!(target: "http", %method, %route, status, elapsed_ms, "HTTP request completed");
    }

    response
}
