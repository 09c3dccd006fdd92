//! Application state for Axum handlers.

use std::sync::Arc;
use strata_core::HealthCheck;
use strata_service::{OrderService, ProductService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub order_service: Arc<dyn OrderService>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        product_service: Arc<dyn ProductService>,
        order_service: Arc<dyn OrderService>,
    ) -> Self {
        Self {
            product_service,
            order_service,
            health_checks: Vec::new(),
        }
    }

    /// Adds a dependency probed by the readiness endpoint.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}
