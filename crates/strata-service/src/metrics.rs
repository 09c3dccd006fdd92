//! Access instrumentation for the cache accessors.
//!
//! The accessors report every cache lookup, cache write, and store call
//! through [`AccessMetrics`]. Production wiring uses
//! [`PrometheusAccessMetrics`]; tests inject a recording fake.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use shaku::{Component, Interface};
use std::fmt;
use std::time::Duration;

/// Metric names for the accessors.
pub mod names {
    /// Cache lookups by outcome.
    pub const CACHE_LOOKUPS_TOTAL: &str = "strata_cache_lookups_total";
    /// Cache lookup duration in seconds.
    pub const CACHE_LOOKUP_DURATION: &str = "strata_cache_lookup_duration_seconds";
    /// Cache writes (set/delete) by result.
    pub const CACHE_WRITES_TOTAL: &str = "strata_cache_writes_total";
    /// Cache write duration in seconds.
    pub const CACHE_WRITE_DURATION: &str = "strata_cache_write_duration_seconds";
    /// Store calls by operation.
    pub const STORE_CALLS_TOTAL: &str = "strata_store_calls_total";
    /// Store call duration in seconds.
    pub const STORE_CALL_DURATION: &str = "strata_store_call_duration_seconds";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::CACHE_LOOKUPS_TOTAL,
        "Total number of cache lookups by entity and outcome"
    );
    describe_histogram!(
        names::CACHE_LOOKUP_DURATION,
        "Cache lookup duration in seconds"
    );
    describe_counter!(
        names::CACHE_WRITES_TOTAL,
        "Total number of cache sets and deletes by entity, operation and result"
    );
    describe_histogram!(
        names::CACHE_WRITE_DURATION,
        "Cache write duration in seconds"
    );
    describe_counter!(
        names::STORE_CALLS_TOTAL,
        "Total number of store calls by entity and operation"
    );
    describe_histogram!(
        names::STORE_CALL_DURATION,
        "Store call duration in seconds"
    );
}

/// Result of a cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Decoded value served from the cache.
    Hit,
    /// Key absent.
    Miss,
    /// Cache unavailable or timed out; treated as a miss.
    Error,
    /// Payload present but not decodable; treated as a miss.
    Corrupt,
}

impl LookupOutcome {
    /// Label value for this outcome.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Error => "error",
            Self::Corrupt => "corrupt",
        }
    }
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of cache mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheWriteOp {
    /// Entry written.
    Set,
    /// Entry evicted.
    Delete,
}

impl CacheWriteOp {
    /// Label value for this operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Delete => "delete",
        }
    }
}

/// Store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Create,
    FindById,
    Save,
    ExistsById,
    DeleteById,
    FindAll,
}

impl StoreOp {
    /// Label value for this operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::FindById => "find_by_id",
            Self::Save => "save",
            Self::ExistsById => "exists_by_id",
            Self::DeleteById => "delete_by_id",
            Self::FindAll => "find_all",
        }
    }
}

/// Sink for accessor instrumentation.
pub trait AccessMetrics: Interface + Send + Sync {
    /// Records a cache lookup.
    fn cache_lookup(&self, entity: &'static str, outcome: LookupOutcome, elapsed: Duration);

    /// Records a cache set or delete.
    fn cache_write(&self, entity: &'static str, op: CacheWriteOp, ok: bool, elapsed: Duration);

    /// Records a store call.
    fn store_call(&self, entity: &'static str, op: StoreOp, elapsed: Duration);
}

/// Records accessor metrics through the global `metrics` recorder.
#[derive(Component, Clone, Default)]
#[shaku(interface = AccessMetrics)]
pub struct PrometheusAccessMetrics;

impl AccessMetrics for PrometheusAccessMetrics {
    fn cache_lookup(&self, entity: &'static str, outcome: LookupOutcome, elapsed: Duration) {
        counter!(
            names::CACHE_LOOKUPS_TOTAL,
            "entity" => entity,
            "outcome" => outcome.as_str()
        )
        .increment(1);

        histogram!(names::CACHE_LOOKUP_DURATION, "entity" => entity)
            .record(elapsed.as_secs_f64());
    }

    fn cache_write(&self, entity: &'static str, op: CacheWriteOp, ok: bool, elapsed: Duration) {
        counter!(
            names::CACHE_WRITES_TOTAL,
            "entity" => entity,
            "op" => op.as_str(),
            "result" => if ok { "ok" } else { "error" }
        )
        .increment(1);

        histogram!(
            names::CACHE_WRITE_DURATION,
            "entity" => entity,
            "op" => op.as_str()
        )
        .record(elapsed.as_secs_f64());
    }

    fn store_call(&self, entity: &'static str, op: StoreOp, elapsed: Duration) {
        counter!(
            names::STORE_CALLS_TOTAL,
            "entity" => entity,
            "op" => op.as_str()
        )
        .increment(1);

        histogram!(
            names::STORE_CALL_DURATION,
            "entity" => entity,
            "op" => op.as_str()
        )
        .record(elapsed.as_secs_f64());
    }
}

/// Discards every measurement.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAccessMetrics;

impl AccessMetrics for NoopAccessMetrics {
    fn cache_lookup(&self, _: &'static str, _: LookupOutcome, _: Duration) {}

    fn cache_write(&self, _: &'static str, _: CacheWriteOp, _: bool, _: Duration) {}

    fn store_call(&self, _: &'static str, _: StoreOp, _: Duration) {}
}
