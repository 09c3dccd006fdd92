//! Order service implementation.

use crate::accessor::{CacheSettings, WriteThroughAccessor};
use crate::cache::CacheInterface;
use crate::dto::OrderRequest;
use crate::metrics::AccessMetrics;
use crate::order_service::OrderService;
use async_trait::async_trait;
use std::sync::Arc;
use strata_core::{Order, OrderId, OrderStatus, StrataResult, ValidateExt};
use strata_repository::OrderRepository;
use tracing::debug;

/// Order service over a write-through accessor.
pub struct OrderServiceImpl<R: OrderRepository + ?Sized> {
    accessor: WriteThroughAccessor<Order, R>,
}

impl<R: OrderRepository + ?Sized> OrderServiceImpl<R> {
    /// Creates a new order service.
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheInterface>,
        metrics: Arc<dyn AccessMetrics>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            accessor: WriteThroughAccessor::new(repository, cache, metrics, settings),
        }
    }
}

#[async_trait]
impl<R: OrderRepository + ?Sized + 'static> OrderService for OrderServiceImpl<R> {
    async fn create_order(&self, request: OrderRequest) -> StrataResult<Order> {
        debug!("Creating order for customer: {}", request.customer_name);
        request.validate_request()?;
        self.accessor
            .create(request.into_order(OrderStatus::default()))
            .await
    }

    async fn get_order(&self, id: OrderId) -> StrataResult<Order> {
        debug!("Getting order: {}", id);
        self.accessor.read(id).await
    }

    async fn list_orders(&self) -> StrataResult<Vec<Order>> {
        debug!("Listing orders");
        self.accessor.list_all().await
    }

    async fn update_order(&self, id: OrderId, request: OrderRequest) -> StrataResult<Order> {
        debug!("Updating order: {}", id);
        request.validate_request()?;

        self.accessor
            .update(id, move |order| {
                let incoming = request.into_order(order.status);
                order.overwrite_from(incoming);
            })
            .await
    }

    async fn delete_order(&self, id: OrderId) -> StrataResult<()> {
        debug!("Deleting order: {}", id);
        self.accessor.delete(id).await
    }
}

impl<R: OrderRepository + ?Sized> std::fmt::Debug for OrderServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::StoreOp;
    use crate::test_support::{FakeCache, FakeStore, RecordingMetrics};
    use std::time::Duration;
    use strata_core::StrataError;

    struct Fixture {
        store: Arc<FakeStore<Order>>,
        cache: Arc<FakeCache>,
        metrics: Arc<RecordingMetrics>,
        service: OrderServiceImpl<FakeStore<Order>>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(FakeStore::orders());
        let cache = Arc::new(FakeCache::new());
        let metrics = Arc::new(RecordingMetrics::default());
        let service = OrderServiceImpl::new(
            store.clone(),
            cache.clone(),
            metrics.clone(),
            CacheSettings {
                ttl: None,
                operation_timeout: Duration::from_millis(100),
            },
        );
        Fixture {
            store,
            cache,
            metrics,
            service,
        }
    }

    fn request(customer: &str, quantity: i32, status: Option<OrderStatus>) -> OrderRequest {
        OrderRequest {
            customer_name: customer.to_string(),
            product: "widget".to_string(),
            quantity,
            price: 9.99,
            status,
        }
    }

    #[tokio::test]
    async fn test_create_then_read_scenario() {
        let f = fixture();

        let created = f.service.create_order(request("A", 2, None)).await.unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.status, OrderStatus::Pending);
        assert_eq!(created.created_at, created.updated_at);

        let read = f.service.get_order(created.id.unwrap()).await.unwrap();
        assert_eq!(read, created);
        assert_eq!(f.store.calls(StoreOp::FindById), 0);
        assert_eq!(f.cache.gets(), 1);
    }

    #[tokio::test]
    async fn test_update_without_status_keeps_current_status() {
        let f = fixture();
        let id = f
            .service
            .create_order(request("A", 2, Some(OrderStatus::Confirmed)))
            .await
            .unwrap()
            .id
            .unwrap();

        let updated = f
            .service
            .update_order(id, request("B", 5, None))
            .await
            .unwrap();

        assert_eq!(updated.customer_name, "B");
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_update_with_status_replaces_it() {
        let f = fixture();
        let id = f
            .service
            .create_order(request("A", 2, None))
            .await
            .unwrap()
            .id
            .unwrap();

        let updated = f
            .service
            .update_order(id, request("A", 2, Some(OrderStatus::Delivered)))
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Delivered);
        assert_eq!(f.service.get_order(id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_cache_failure_during_create_is_swallowed() {
        let f = fixture();
        f.cache.fail_sets(true);

        let created = f.service.create_order(request("A", 2, None)).await.unwrap();

        assert_eq!(f.store.get(created.id.unwrap()), Some(created));
        assert_eq!(f.metrics.failed_cache_writes(), 1);
    }

    #[tokio::test]
    async fn test_invalid_order_rejected_before_store() {
        let f = fixture();

        let err = f
            .service
            .create_order(request("A", 0, None))
            .await
            .unwrap_err();

        assert!(matches!(err, StrataError::Validation(_)));
        assert!(f.metrics.store_calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let f = fixture();
        for customer in ["A", "B", "C"] {
            f.service
                .create_order(request(customer, 1, None))
                .await
                .unwrap();
        }

        f.service.delete_order(OrderId::new(2)).await.unwrap();
        let remaining = f.service.list_orders().await.unwrap();

        let customers: Vec<_> = remaining.iter().map(|o| o.customer_name.as_str()).collect();
        assert_eq!(customers, vec!["A", "C"]);
        assert!(f.cache.raw("order:2").await.is_none());
        assert!(f
            .service
            .delete_order(OrderId::new(2))
            .await
            .unwrap_err()
            .is_not_found());
    }
}
