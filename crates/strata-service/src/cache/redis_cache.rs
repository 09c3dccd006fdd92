//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use strata_core::{HealthCheck, HealthStatus, StrataError, StrataResult};
use tracing::debug;

/// Bound on the readiness `PING` when none is configured.
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_millis(500);

/// Redis-based cache service.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Arc<Pool>,
    /// Upper bound for the health probe round trip.
    #[shaku(default = DEFAULT_PING_TIMEOUT)]
    ping_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>, ping_timeout: Duration) -> Self {
        Self { pool, ping_timeout }
    }

    async fn get_conn(&self) -> StrataResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| StrataError::Cache(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get_raw(&self, key: &str) -> StrataResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            StrataError::Cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> StrataResult<()> {
        let mut conn = self.get_conn().await?;

        match ttl {
            Some(ttl) => {
                let ttl_secs = ttl.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
                    StrataError::Cache(format!("Failed to set key '{}': {}", key, e))
                })?;
                debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
            }
            None => {
                conn.set::<_, _, ()>(key, value).await.map_err(|e| {
                    StrataError::Cache(format!("Failed to set key '{}': {}", key, e))
                })?;
                debug!("Cached key '{}' without expiry", key);
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> StrataResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            StrataError::Cache(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn ping(&self) -> StrataResult<()> {
        let mut conn = self.get_conn().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| StrataError::Cache(format!("PING failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "redis"
    }

    async fn check(&self) -> HealthStatus {
        // The accessors treat an unreachable cache as a miss.
        match tokio::time::timeout(self.ping_timeout, self.ping()).await {
            Ok(Ok(())) => HealthStatus::Healthy,
            Ok(Err(e)) => HealthStatus::Degraded(e.to_string()),
            Err(_) => HealthStatus::Degraded(format!(
                "PING timed out after {}ms",
                self.ping_timeout.as_millis()
            )),
        }
    }
}
