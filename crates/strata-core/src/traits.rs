//! Core traits shared across layers.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;
use std::hash::Hash;

/// A store-backed record that can be mirrored into the cache.
///
/// The cache accessors are generic over this trait. Implementors provide
/// the cache key prefix, the store-assigned id, and the timestamp stamping
/// rules for create and update.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Store-assigned identifier type.
    type Id: Copy + Eq + Hash + Display + Send + Sync + 'static;

    /// Human-readable resource name used in errors and logs.
    const RESOURCE: &'static str;

    /// Prefix of the cache key, `"<prefix>:<id>"`.
    const CACHE_PREFIX: &'static str;

    /// Returns the identifier, or `None` before the store has assigned one.
    fn id(&self) -> Option<Self::Id>;

    /// Stamps creation timestamps on a record that is about to be inserted.
    fn mark_created(&mut self, now: NaiveDateTime);

    /// Refreshes the last-modified timestamp without moving it backwards.
    fn mark_updated(&mut self, now: NaiveDateTime);
}

/// Trait for health checks.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Returns the name of this health check.
    fn name(&self) -> &str;

    /// Performs the health check.
    async fn check(&self) -> HealthStatus;
}

/// Health check status.
#[derive(Debug, Clone)]
pub enum HealthStatus {
    /// The component is healthy.
    Healthy,
    /// The component is degraded but functional.
    Degraded(String),
    /// The component is unhealthy.
    Unhealthy(String),
}

impl HealthStatus {
    /// Returns true if the status is healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns true if the status is unhealthy.
    #[must_use]
    pub const fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_predicates() {
        assert!(HealthStatus::Healthy.is_healthy());
        assert!(!HealthStatus::Degraded("slow".into()).is_healthy());
        assert!(!HealthStatus::Degraded("slow".into()).is_unhealthy());
        assert!(HealthStatus::Unhealthy("down".into()).is_unhealthy());
    }
}
