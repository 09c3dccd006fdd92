//! Write-through accessor: every store write is mirrored into the cache.

use super::entity_cache::EntityCache;
use super::{timed_store, CacheSettings};
use crate::cache::CacheInterface;
use crate::metrics::{AccessMetrics, StoreOp};
use futures::future::join_all;
use std::marker::PhantomData;
use std::sync::Arc;
use strata_core::{timestamp, Entity, StrataError, StrataResult};
use strata_repository::EntityRepository;
use tracing::{debug, info};

/// Persists to the store first, then writes the persisted record into the
/// cache at its canonical key. Reads try the cache first and repopulate it
/// from the store on a miss.
pub struct WriteThroughAccessor<E, R: ?Sized> {
    store: Arc<R>,
    cache: EntityCache<E>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> WriteThroughAccessor<E, R>
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

    /// Stamps and inserts `entity`, then caches the persisted record.
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
            self.cache.put(id, &created).await;
            info!(entity = E::RESOURCE, id = %id, "Created and cached");
        }
        Ok(created)
    }

    /// Loads `id`, applies `overwrite`, persists, then caches the result.
    pub async fn update<F>(&self, id: E::Id, overwrite: F) -> StrataResult<E>
    where
        F: FnOnce(&mut E) + Send,
    {
        let mut entity = self.find_existing(id).await?;
        overwrite(&mut entity);
        entity.mark_updated(timestamp::now());

        let saved = timed_store(
            self.cache.metrics(),
            E::RESOURCE,
            StoreOp::Save,
            self.store.save(&entity),
        )
        .await?;

        self.cache.put(id, &saved).await;
        info!(entity = E::RESOURCE, id = %id, "Updated and cached");
        Ok(saved)
    }

    /// Returns the record for `id`, from the cache when present.
    pub async fn read(&self, id: E::Id) -> StrataResult<E> {
        if let Some(hit) = self.cache.lookup(id).await {
            return Ok(hit.value);
        }

        let entity = self.find_existing(id).await?;
        self.cache.put(id, &entity).await;
        Ok(entity)
    }

    /// Deletes `id` from the store, then evicts the cached entry.
    pub async fn delete(&self, id: E::Id) -> StrataResult<()> {
        let exists = timed_store(
            self.cache.metrics(),
            E::RESOURCE,
            StoreOp::ExistsById,
            self.store.exists_by_id(id),
        )
        .await?;
        if !exists {
            return Err(StrataError::not_found(E::RESOURCE, id));
        }

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

    /// Loads every record from the store and caches each one.
    ///
    /// The cache writes run concurrently, so a hung cache costs one
    /// operation timeout for the whole batch. The returned list is the
    /// store's, whatever the cache writes did.
    pub async fn list_all(&self) -> StrataResult<Vec<E>> {
        let all = timed_store(
            self.cache.metrics(),
            E::RESOURCE,
            StoreOp::FindAll,
            self.store.find_all(),
        )
        .await?;

        let puts = all.iter().filter_map(|entity| match entity.id() {
            Some(id) => Some(self.cache.put(id, entity)),
            None => {
                debug!(entity = E::RESOURCE, "Skipping record without id");
                None
            }
        });
        join_all(puts).await;

        Ok(all)
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
}
