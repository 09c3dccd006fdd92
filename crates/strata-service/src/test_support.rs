//! In-memory collaborators for the accessor and service tests.

use crate::cache::{CacheInterface, MemoryCacheService};
use crate::metrics::{AccessMetrics, CacheWriteOp, LookupOutcome, StoreOp};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;
use strata_core::{Entity, Order, OrderId, Product, ProductId, StrataError, StrataResult};
use strata_repository::EntityRepository;

/// Store fake with call counting and an injectable outage.
pub struct FakeStore<E> {
    rows: Mutex<Vec<E>>,
    next_id: AtomicI64,
    assign_id: fn(&mut E, i64),
    calls: Mutex<HashMap<StoreOp, usize>>,
    failing: AtomicBool,
}

impl FakeStore<Product> {
    pub fn products() -> Self {
        Self::new(|p, id| p.id = Some(ProductId::new(id)))
    }
}

impl FakeStore<Order> {
    pub fn orders() -> Self {
        Self::new(|o, id| o.id = Some(OrderId::new(id)))
    }
}

impl<E: Entity> FakeStore<E> {
    fn new(assign_id: fn(&mut E, i64)) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(0),
            assign_id,
            calls: Mutex::new(HashMap::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn calls(&self, op: StoreOp) -> usize {
        self.calls.lock().get(&op).copied().unwrap_or(0)
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn get(&self, id: E::Id) -> Option<E> {
        self.rows
            .lock()
            .iter()
            .find(|e| e.id() == Some(id))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    /// Edits a stored row behind the accessor's back.
    pub fn mutate(&self, id: E::Id, edit: impl FnOnce(&mut E)) {
        let mut rows = self.rows.lock();
        if let Some(row) = rows.iter_mut().find(|e| e.id() == Some(id)) {
            edit(row);
        }
    }

    fn record(&self, op: StoreOp) -> StrataResult<()> {
        *self.calls.lock().entry(op).or_insert(0) += 1;
        if self.failing.load(Ordering::SeqCst) {
            return Err(StrataError::Database("store unavailable".to_string()));
        }
        Ok(())
    }

    fn insert(&self, entity: &E) -> E {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut stored = entity.clone();
        (self.assign_id)(&mut stored, id);
        self.rows.lock().push(stored.clone());
        stored
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for FakeStore<E> {
    async fn create(&self, entity: &E) -> StrataResult<E> {
        self.record(StoreOp::Create)?;
        Ok(self.insert(entity))
    }

    async fn find_by_id(&self, id: E::Id) -> StrataResult<Option<E>> {
        self.record(StoreOp::FindById)?;
        Ok(self.get(id))
    }

    async fn save(&self, entity: &E) -> StrataResult<E> {
        self.record(StoreOp::Save)?;
        let Some(id) = entity.id() else {
            return Ok(self.insert(entity));
        };

        let mut rows = self.rows.lock();
        match rows.iter_mut().find(|e| e.id() == Some(id)) {
            Some(row) => *row = entity.clone(),
            None => rows.push(entity.clone()),
        }
        Ok(entity.clone())
    }

    async fn exists_by_id(&self, id: E::Id) -> StrataResult<bool> {
        self.record(StoreOp::ExistsById)?;
        Ok(self.get(id).is_some())
    }

    async fn delete_by_id(&self, id: E::Id) -> StrataResult<bool> {
        self.record(StoreOp::DeleteById)?;
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|e| e.id() != Some(id));
        Ok(rows.len() < before)
    }

    async fn find_all(&self) -> StrataResult<Vec<E>> {
        self.record(StoreOp::FindAll)?;
        Ok(self.rows.lock().clone())
    }
}

/// Cache fake over [`MemoryCacheService`] with counters, injectable
/// failures, and an optional artificial delay.
pub struct FakeCache {
    inner: MemoryCacheService,
    gets: AtomicUsize,
    sets: AtomicUsize,
    deletes: AtomicUsize,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    fail_delete: AtomicBool,
    delay: Mutex<Option<Duration>>,
    last_ttl: Mutex<Option<Option<Duration>>>,
}

impl FakeCache {
    pub fn new() -> Self {
        Self {
            inner: MemoryCacheService::default(),
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            fail_get: AtomicBool::new(false),
            fail_set: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            delay: Mutex::new(None),
            last_ttl: Mutex::new(None),
        }
    }

    pub fn fail_gets(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sets(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// TTL passed to the most recent set, `None` if nothing was set yet.
    pub fn last_ttl(&self) -> Option<Option<Duration>> {
        *self.last_ttl.lock()
    }

    /// Writes a payload directly, bypassing counters and failures.
    pub async fn seed(&self, key: &str, raw: &str) {
        self.inner.set_raw(key, raw, None).await.unwrap();
    }

    /// Reads a payload directly, bypassing counters and failures.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.get_raw(key).await.unwrap()
    }

    pub async fn clear(&self) {
        self.inner.clear();
    }

    async fn enter(&self, counter: &AtomicUsize, failing: &AtomicBool) -> StrataResult<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failing.load(Ordering::SeqCst) {
            return Err(StrataError::cache("injected cache failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheInterface for FakeCache {
    async fn get_raw(&self, key: &str) -> StrataResult<Option<String>> {
        self.enter(&self.gets, &self.fail_get).await?;
        self.inner.get_raw(key).await
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> StrataResult<()> {
        *self.last_ttl.lock() = Some(ttl);
        self.enter(&self.sets, &self.fail_set).await?;
        self.inner.set_raw(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> StrataResult<bool> {
        self.enter(&self.deletes, &self.fail_delete).await?;
        self.inner.delete(key).await
    }

    async fn ping(&self) -> StrataResult<()> {
        self.enter(&self.gets, &self.fail_get).await
    }
}

/// Metrics sink that keeps every event for assertions.
#[derive(Default)]
pub struct RecordingMetrics {
    lookups: Mutex<Vec<LookupOutcome>>,
    writes: Mutex<Vec<(CacheWriteOp, bool)>>,
    store_calls: Mutex<Vec<StoreOp>>,
}

impl RecordingMetrics {
    pub fn lookups(&self) -> Vec<LookupOutcome> {
        self.lookups.lock().clone()
    }

    pub fn failed_cache_writes(&self) -> usize {
        self.writes.lock().iter().filter(|(_, ok)| !ok).count()
    }

    pub fn store_calls(&self) -> Vec<StoreOp> {
        self.store_calls.lock().clone()
    }
}

impl AccessMetrics for RecordingMetrics {
    fn cache_lookup(&self, _entity: &'static str, outcome: LookupOutcome, _elapsed: Duration) {
        self.lookups.lock().push(outcome);
    }

    fn cache_write(&self, _entity: &'static str, op: CacheWriteOp, ok: bool, _elapsed: Duration) {
        self.writes.lock().push((op, ok));
    }

    fn store_call(&self, _entity: &'static str, op: StoreOp, _elapsed: Duration) {
        self.store_calls.lock().push(op);
    }
}

impl strata_repository::ProductRepository for FakeStore<Product> {}

impl strata_repository::OrderRepository for FakeStore<Order> {}
