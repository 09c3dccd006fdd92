//! In-process cache backend.

use super::CacheInterface;
use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use shaku::Component;
use std::sync::Arc;
use std::time::{Duration, Instant};
use strata_core::StrataResult;

/// Entry limit applied when no capacity is configured.
pub const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// A stored payload together with the TTL it was written with.
#[derive(Debug, Clone)]
pub struct Entry {
    value: Arc<str>,
    ttl: Option<Duration>,
}

/// Expires each entry after the TTL it was written with.
struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        entry.ttl
    }

    // An overwrite restarts the clock with the new entry's TTL.
    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        entry.ttl
    }
}

fn build_store(max_entries: u64) -> Cache<String, Entry> {
    Cache::builder()
        .name("strata-memory-cache")
        .max_capacity(max_entries)
        .expire_after(EntryExpiry)
        .build()
}

/// Capacity-bounded in-memory cache with per-entry expiry, backed by moka.
///
/// Expired and evicted entries are reclaimed by moka's housekeeping, so
/// keys that are written once and never read again do not accumulate.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct MemoryCacheService {
    #[shaku(default = build_store(DEFAULT_MAX_ENTRIES))]
    entries: Cache<String, Entry>,
}

impl MemoryCacheService {
    /// Creates a cache holding at most `max_entries` entries.
    #[must_use]
    pub fn with_capacity(max_entries: u64) -> Self {
        Self {
            entries: build_store(max_entries),
        }
    }

    /// Component parameters for a cache holding at most `max_entries` entries.
    #[must_use]
    pub fn parameters(max_entries: u64) -> MemoryCacheServiceParameters {
        MemoryCacheServiceParameters {
            entries: build_store(max_entries),
        }
    }

    #[cfg(test)]
    pub(crate) fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for MemoryCacheService {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }
}

#[async_trait]
impl CacheInterface for MemoryCacheService {
    async fn get_raw(&self, key: &str) -> StrataResult<Option<String>> {
        Ok(self
            .entries
            .get(key)
            .await
            .map(|entry| entry.value.to_string()))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> StrataResult<()> {
        let entry = Entry {
            value: Arc::from(value),
            ttl,
        };
        self.entries.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StrataResult<bool> {
        Ok(self.entries.remove(key).await.is_some())
    }

    async fn ping(&self) -> StrataResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn held(cache: &MemoryCacheService) -> u64 {
        cache.entries.run_pending_tasks().await;
        cache.entries.entry_count()
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = MemoryCacheService::default();
        cache.set_raw("order:1", r#"{"id":1}"#, None).await.unwrap();

        assert_eq!(
            cache.get_raw("order:1").await.unwrap().as_deref(),
            Some(r#"{"id":1}"#)
        );
        assert!(cache.delete("order:1").await.unwrap());
        assert!(!cache.delete("order:1").await.unwrap());
        assert_eq!(cache.get_raw("order:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_expire_after_their_ttl() {
        let cache = MemoryCacheService::default();
        cache
            .set_raw("product:1", "{}", Some(Duration::from_millis(10)))
            .await
            .unwrap();
        cache.set_raw("product:2", "{}", None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(cache.get_raw("product:1").await.unwrap(), None);
        assert!(cache.get_raw("product:2").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_expired_entries_are_reclaimed_without_reads() {
        let cache = MemoryCacheService::default();
        for i in 0..200 {
            cache
                .set_raw(&format!("product:{i}"), "{}", Some(Duration::from_millis(1)))
                .await
                .unwrap();
        }

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(held(&cache).await, 0);
    }

    #[tokio::test]
    async fn test_capacity_bounds_entry_count() {
        let cache = MemoryCacheService::with_capacity(10);
        for i in 0..200 {
            cache.set_raw(&format!("order:{i}"), "{}", None).await.unwrap();
        }

        assert!(held(&cache).await <= 10);
    }

    #[tokio::test]
    async fn test_overwrite_applies_new_ttl() {
        let cache = MemoryCacheService::default();
        cache
            .set_raw("order:1", "old", Some(Duration::from_millis(10)))
            .await
            .unwrap();
        cache.set_raw("order:1", "new", None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(cache.get_raw("order:1").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_repeated_set_is_idempotent() {
        let cache = MemoryCacheService::default();

        cache.set_raw("order:9", r#"["a","b"]"#, None).await.unwrap();
        let first = cache.get_raw("order:9").await.unwrap();
        cache.set_raw("order:9", r#"["a","b"]"#, None).await.unwrap();
        let second = cache.get_raw("order:9").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(held(&cache).await, 1);
    }

    #[test]
    fn test_component_parameters_have_a_bounded_default() {
        let parameters = MemoryCacheServiceParameters::default();
        assert_eq!(
            parameters.entries.policy().max_capacity(),
            Some(DEFAULT_MAX_ENTRIES)
        );
    }

    #[test]
    fn test_configured_capacity_reaches_parameters() {
        let parameters = MemoryCacheService::parameters(64);
        assert_eq!(parameters.entries.policy().max_capacity(), Some(64));
    }
}
