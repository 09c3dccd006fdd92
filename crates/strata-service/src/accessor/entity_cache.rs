//! Typed, best-effort view of the cache for one entity type.

use super::CacheSettings;
use crate::cache::{cache_keys, CacheInterface};
use crate::metrics::{AccessMetrics, CacheWriteOp, LookupOutcome};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};
use strata_core::{Entity, StrataError, StrataResult};
use tracing::{debug, info, warn};

/// A decoded cache hit.
pub(crate) struct Hit<E> {
    pub value: E,
    /// Canonical encoding, present only when the stored payload differed from it.
    pub reshaped: Option<String>,
}

/// Wraps the cache collaborator for entity `E`.
///
/// No method returns an error: failures are logged and recorded, and the
/// caller continues as if the cache were empty.
pub(crate) struct EntityCache<E> {
    cache: Arc<dyn CacheInterface>,
    metrics: Arc<dyn AccessMetrics>,
    settings: CacheSettings,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityCache<E> {
    pub fn new(
        cache: Arc<dyn CacheInterface>,
        metrics: Arc<dyn AccessMetrics>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            cache,
            metrics,
            settings,
            _entity: PhantomData,
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.settings.ttl
    }

    pub fn metrics(&self) -> &dyn AccessMetrics {
        self.metrics.as_ref()
    }

    /// Looks up `id`. Unavailable, timed-out and undecodable entries are misses.
    pub async fn lookup(&self, id: E::Id) -> Option<Hit<E>> {
        let key = cache_keys::entity_key::<E>(id);
        let start = Instant::now();
        let result = self.bounded(self.cache.get_raw(&key)).await;
        let elapsed = start.elapsed();
        let elapsed_ms = elapsed.as_millis() as u64;

        let (outcome, hit) = match result {
            Ok(Some(raw)) => match decode::<E>(&raw) {
                Ok(hit) => (LookupOutcome::Hit, Some(hit)),
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                    (LookupOutcome::Corrupt, None)
                }
            },
            Ok(None) => (LookupOutcome::Miss, None),
            Err(e) => {
                warn!(key = %key, error = %e, "Cache lookup failed, falling back to store");
                (LookupOutcome::Error, None)
            }
        };

        self.metrics.cache_lookup(E::RESOURCE, outcome, elapsed);
        match outcome {
            LookupOutcome::Hit => info!(key = %key, elapsed_ms, "Cache hit"),
            _ => info!(key = %key, elapsed_ms, outcome = outcome.as_str(), "Cache miss"),
        }

        hit
    }

    /// Writes `entity` under `id` with the configured TTL.
    pub async fn put(&self, id: E::Id, entity: &E) {
        match serde_json::to_string(entity) {
            Ok(json) => self.put_raw(id, &json).await,
            Err(e) => warn!(
                entity = E::RESOURCE,
                id = %id,
                error = %e,
                "Failed to encode entity for cache"
            ),
        }
    }

    /// Writes an already encoded payload under `id` with the configured TTL.
    pub async fn put_raw(&self, id: E::Id, json: &str) {
        let key = cache_keys::entity_key::<E>(id);
        let start = Instant::now();
        let result = self
            .bounded(self.cache.set_raw(&key, json, self.settings.ttl))
            .await;
        let elapsed = start.elapsed();

        self.metrics
            .cache_write(E::RESOURCE, CacheWriteOp::Set, result.is_ok(), elapsed);
        match result {
            Ok(()) => debug!(
                key = %key,
                elapsed_ms = elapsed.as_millis() as u64,
                ttl_secs = self.settings.ttl.map(|t| t.as_secs()),
                "Cache populated"
            ),
            Err(e) => warn!(key = %key, error = %e, "Cache write failed, continuing"),
        }
    }

    /// Removes the entry for `id`.
    pub async fn evict(&self, id: E::Id) {
        let key = cache_keys::entity_key::<E>(id);
        let start = Instant::now();
        let result = self.bounded(self.cache.delete(&key)).await;
        let elapsed = start.elapsed();

        self.metrics
            .cache_write(E::RESOURCE, CacheWriteOp::Delete, result.is_ok(), elapsed);
        match result {
            Ok(existed) => debug!(
                key = %key,
                existed,
                elapsed_ms = elapsed.as_millis() as u64,
                "Cache entry evicted"
            ),
            Err(e) => warn!(key = %key, error = %e, "Cache eviction failed, continuing"),
        }
    }

    async fn bounded<T, F>(&self, call: F) -> StrataResult<T>
    where
        F: Future<Output = StrataResult<T>>,
    {
        let limit = self.settings.operation_timeout;
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(StrataError::cache(format!(
                "Cache operation timed out after {}ms",
                limit.as_millis()
            ))),
        }
    }
}

/// Decodes a payload into `E` and notes whether it needs re-storing.
fn decode<E: Entity>(raw: &str) -> StrataResult<Hit<E>> {
    let value: E = serde_json::from_str(raw)?;
    let canonical = serde_json::to_string(&value)?;
    let reshaped = (canonical != raw).then_some(canonical);
    Ok(Hit { value, reshaped })
}
