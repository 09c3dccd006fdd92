//! Cache-aside accessor: populate on read, evict on write.

use super::entity_cache::EntityCache;
use super::{timed_store, CacheSettings};
use crate::cache::CacheInterface;
use crate::metrics::{AccessMetrics, StoreOp};
use std::marker::PhantomData;
use std::sync::Arc;
use strata_core::{timestamp, Entity, StrataError, StrataResult};
use strata_repository::EntityRepository;
use tracing::info;

/// Reads through the cache, populating it on a miss with the configured TTL.
/// Writes go to the store and then evict the cached entry; the cache is
/// never updated in place.
pub struct CacheAsideAccessor<E, R: ?Sized> {
    store: Arc<R>,
    cache: EntityCache<E>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> CacheAsideAccessor<E, R>
where
    E: Entity,
    R: EntityRepository<E> + ?Sized,
{
    /// Creates an accessor over the given collaborators.
    pub fn new(
        store: Arc<R>,
        cache: Arc<dyn CacheInterface>,
        metrics: Arc<dyn AccessMetrics>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            store,
            cache: EntityCache::new(cache, metrics, settings),
            _entity: PhantomData,
        }
    }

    /// Returns the record for `id`, from the cache when present.
    ///
    /// A hit whose payload is not in canonical form is re-stored canonically
    /// under the same key. A miss loads from the store and populates the cache.
    pub async fn read(&self, id: E::Id) -> StrataResult<E> {
        if let Some(hit) = self.cache.lookup(id).await {
            if let Some(canonical) = hit.reshaped {
                self.cache.put_raw(id, &canonical).await;
            }
            return Ok(hit.value);
        }

        let entity = self.find_existing(id).await?;
        self.cache.put(id, &entity).await;
        Ok(entity)
    }

    /// Inserts a new record. The cache is left to the first read.
    pub async fn create(&self, mut entity: E) -> StrataResult<E> {
        entity.mark_created(timestamp::now());
        let created = timed_store(
            self.cache.metrics(),
            E::RESOURCE,
            StoreOp::Create,
            self.store.create(&entity),
        )
        .await?;

        if let Some(id) = created.id() {
            info!(entity = E::RESOURCE, id = %id, "Created");
        }
        Ok(created)
    }

    /// Loads `id`, applies `patch`, persists, then evicts the cached entry.
    pub async fn update<F>(&self, id: E::Id, patch: F) -> StrataResult<E>
    where
        F: FnOnce(&mut E) + Send,
    {
        let mut entity = self.find_existing(id).await?;
        patch(&mut entity);
        entity.mark_updated(timestamp::now());

        let saved = timed_store(
            self.cache.metrics(),
            E::RESOURCE,
            StoreOp::Save,
            self.store.save(&entity),
        )
        .await?;

        self.cache.evict(id).await;
        info!(entity = E::RESOURCE, id = %id, "Updated and invalidated cache entry");
        Ok(saved)
    }

    /// Deletes `id` from the store, then evicts the cached entry.
    pub async fn delete(&self, id: E::Id) -> StrataResult<()> {
        self.ensure_exists(id).await?;

        timed_store(
            self.cache.metrics(),
            E::RESOURCE,
            StoreOp::DeleteById,
            self.store.delete_by_id(id),
        )
        .await?;

        self.cache.evict(id).await;
        info!(entity = E::RESOURCE, id = %id, "Deleted");
        Ok(())
    }

    async fn find_existing(&self, id: E::Id) -> StrataResult<E> {
        timed_store(
            self.cache.metrics(),
            E::RESOURCE,
            StoreOp::FindById,
            self.store.find_by_id(id),
        )
        .await?
        .ok_or_else(|| StrataError::not_found(E::RESOURCE, id))
    }

    async fn ensure_exists(&self, id: E::Id) -> StrataResult<()> {
        let exists = timed_store(
            self.cache.metrics(),
            E::RESOURCE,
            StoreOp::ExistsById,
            self.store.exists_by_id(id),
        )
        .await?;

        if exists {
            Ok(())
        } else {
            Err(StrataError::not_found(E::RESOURCE, id))
        }
    }
}
