//! # Strata REST
//!
//! REST API layer using Axum.
//! Provides HTTP endpoints for products, orders, health checks and metrics.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
