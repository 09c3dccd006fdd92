//! In-process wiring for the API tests: vector-backed repositories and an
//! in-memory cache that can be told to fail.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use strata_config::{CacheConfig, ServerConfig};
use strata_core::{Entity, Order, OrderId, Product, ProductId, StrataError, StrataResult};
use strata_repository::{EntityRepository, OrderRepository, ProductRepository};
use strata_rest::{create_router, AppState};
use strata_service::metrics::NoopAccessMetrics;
use strata_service::{
    CacheInterface, CacheSettings, MemoryCacheService, OrderServiceImpl, ProductServiceImpl,
};

pub struct VecRepository<E> {
    rows: Mutex<Vec<E>>,
    next_id: AtomicI64,
    assign_id: fn(&mut E, i64),
}

impl<E: Entity> VecRepository<E> {
    fn new(assign_id: fn(&mut E, i64)) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(0),
            assign_id,
        }
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for VecRepository<E> {
    async fn create(&self, entity: &E) -> StrataResult<E> {
        let mut row = entity.clone();
        (self.assign_id)(&mut row, self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: E::Id) -> StrataResult<Option<E>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id() == Some(id)).cloned())
    }

    async fn save(&self, entity: &E) -> StrataResult<E> {
        let Some(id) = entity.id() else {
            return self.create(entity).await;
        };
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id() == Some(id)) {
            Some(row) => *row = entity.clone(),
            None => rows.push(entity.clone()),
        }
        Ok(entity.clone())
    }

    async fn exists_by_id(&self, id: E::Id) -> StrataResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn delete_by_id(&self, id: E::Id) -> StrataResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id() != Some(id));
        Ok(rows.len() != before)
    }

    async fn find_all(&self) -> StrataResult<Vec<E>> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

impl ProductRepository for VecRepository<Product> {}

impl OrderRepository for VecRepository<Order> {}

/// Memory cache whose writes can be switched to fail.
#[derive(Default)]
pub struct SwitchableCache {
    inner: MemoryCacheService,
    fail_sets: AtomicBool,
}

impl SwitchableCache {
    pub fn fail_sets(&self, fail: bool) {
        self.fail_sets.store(fail, Ordering::SeqCst);
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.get_raw(key).await.unwrap()
    }
}

#[async_trait]
impl CacheInterface for SwitchableCache {
    async fn get_raw(&self, key: &str) -> StrataResult<Option<String>> {
        self.inner.get_raw(key).await
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> StrataResult<()> {
        if self.fail_sets.load(Ordering::SeqCst) {
            return Err(StrataError::cache("connection reset"));
        }
        self.inner.set_raw(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> StrataResult<bool> {
        self.inner.delete(key).await
    }

    async fn ping(&self) -> StrataResult<()> {
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub cache: Arc<SwitchableCache>,
    pub products: Arc<VecRepository<Product>>,
    pub orders: Arc<VecRepository<Order>>,
}

pub fn test_app() -> TestApp {
    let cache = Arc::new(SwitchableCache::default());
    let products = Arc::new(VecRepository::new(|p: &mut Product, id| {
        p.id = Some(ProductId::new(id));
    }));
    let orders = Arc::new(VecRepository::new(|o: &mut Order, id| {
        o.id = Some(OrderId::new(id));
    }));
    let cache_config = CacheConfig::default();

    let product_service = ProductServiceImpl::new(
        products.clone(),
        cache.clone(),
        Arc::new(NoopAccessMetrics),
        CacheSettings::cache_aside(&cache_config),
    );
    let order_service = OrderServiceImpl::new(
        orders.clone(),
        cache.clone(),
        Arc::new(NoopAccessMetrics),
        CacheSettings::write_through(&cache_config),
    );

    let state = AppState::new(Arc::new(product_service), Arc::new(order_service));
    let router = create_router(state, &ServerConfig::default());

    TestApp {
        router,
        cache,
        products,
        orders,
    }
}
