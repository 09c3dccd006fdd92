//! Cache accessors.
//!
//! Both accessors sit between a service and its two collaborators, the
//! store (system of record) and the cache (derived, possibly stale copy).
//! They differ only in what a write does to the cache:
//!
//! - [`CacheAsideAccessor`] evicts the key after a store write and lets the
//!   next read repopulate it with a TTL.
//! - [`WriteThroughAccessor`] writes the persisted record into the cache
//!   right after the store write.
//!
//! Store failures are fatal. Cache failures, timeouts and undecodable
//! payloads are logged at `warn` and never reach the caller: a failed
//! lookup is a miss and a failed set or delete is skipped.

mod cache_aside;
mod entity_cache;
mod write_through;

pub use cache_aside::CacheAsideAccessor;
pub use write_through::WriteThroughAccessor;

use crate::metrics::{AccessMetrics, StoreOp};
use std::future::Future;
use std::time::{Duration, Instant};
use strata_config::CacheConfig;
use strata_core::StrataResult;
use tracing::debug;

/// Per-accessor cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Expiry applied to every entry the accessor writes. `None` = no expiry.
    pub ttl: Option<Duration>,
    /// Upper bound for one cache round trip.
    pub operation_timeout: Duration,
}

impl CacheSettings {
    /// Settings for the cache-aside accessor.
    #[must_use]
    pub const fn cache_aside(config: &CacheConfig) -> Self {
        Self {
            ttl: Some(config.cache_aside_ttl()),
            operation_timeout: config.operation_timeout(),
        }
    }

    /// Settings for the write-through accessor.
    #[must_use]
    pub fn write_through(config: &CacheConfig) -> Self {
        Self {
            ttl: config.write_through_ttl(),
            operation_timeout: config.operation_timeout(),
        }
    }
}

/// Runs a store call, recording its latency. Errors pass through untouched.
async fn timed_store<T, F>(
    metrics: &dyn AccessMetrics,
    entity: &'static str,
    op: StoreOp,
    call: F,
) -> StrataResult<T>
where
    F: Future<Output = StrataResult<T>>,
{
    let start = Instant::now();
    let result = call.await;
    let elapsed = start.elapsed();

    metrics.store_call(entity, op, elapsed);
    debug!(
        entity,
        op = op.as_str(),
        elapsed_ms = elapsed.as_millis() as u64,
        ok = result.is_ok(),
        "Store call finished"
    );

    result
}
