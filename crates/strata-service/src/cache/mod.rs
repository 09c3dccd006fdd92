//! Cache collaborator for the accessors.
//!
//! Values are stored as JSON text under `"<entity-prefix>:<id>"` keys.
//! Redis is the production backend; the in-memory backend serves
//! single-node deployments with Redis disabled and the test suites.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::CacheInterface;
pub use memory_cache::{MemoryCacheService, MemoryCacheServiceParameters, DEFAULT_MAX_ENTRIES};
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters, DEFAULT_PING_TIMEOUT};
