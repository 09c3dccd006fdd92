//! Cache key generators for consistent key naming.

use strata_core::Entity;

/// Key under which an entity with the given id is cached: `"<prefix>:<id>"`.
#[must_use]
pub fn entity_key<E: Entity>(id: E::Id) -> String {
    format!("{}:{}", E::CACHE_PREFIX, id)
}
