//! Order service trait definition.

use crate::dto::OrderRequest;
use async_trait::async_trait;
use strata_core::{Interface, Order, OrderId, StrataResult};

/// Order operations, served write-through.
#[async_trait]
pub trait OrderService: Interface + Send + Sync {
    /// Creates an order and caches it.
    async fn create_order(&self, request: OrderRequest) -> StrataResult<Order>;

    /// Gets an order by ID, from the cache when present.
    async fn get_order(&self, id: OrderId) -> StrataResult<Order>;

    /// Lists every order from the store.
    async fn list_orders(&self) -> StrataResult<Vec<Order>>;

    /// Replaces an order's mutable fields and refreshes the cache.
    async fn update_order(&self, id: OrderId, request: OrderRequest) -> StrataResult<Order>;

    /// Deletes an order and evicts it from the cache.
    async fn delete_order(&self, id: OrderId) -> StrataResult<()>;
}
