//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use shaku::Interface;
use std::time::Duration;
use strata_core::StrataResult;

/// Cache interface for storing and retrieving cached data.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
/// Every error returned here is a [`StrataError::Cache`](strata_core::StrataError).
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> StrataResult<Option<String>>;

    /// Set a raw JSON value in the cache.
    ///
    /// With `ttl` of `None` the entry never expires on its own.
    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> StrataResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> StrataResult<bool>;

    /// Round-trips the backend.
    async fn ping(&self) -> StrataResult<()>;
}
