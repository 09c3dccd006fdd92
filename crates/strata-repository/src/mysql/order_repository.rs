//! MySQL order repository implementation.

use crate::{DatabasePoolInterface, EntityRepository, OrderRepository};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use strata_core::{Order, OrderId, OrderStatus, StrataError, StrataResult};
use tracing::debug;

const SELECT_COLUMNS: &str =
    "SELECT id, customer_name, product, quantity, price, status, created_at, updated_at FROM orders";

/// MySQL order repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = OrderRepository)]
pub struct MySqlOrderRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlOrderRepository {
    /// Creates a new MySQL order repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of an order.
#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    customer_name: String,
    product: String,
    quantity: i32,
    price: f64,
    status: String,
    created_at: Option<NaiveDateTime>,
    updated_at: Option<NaiveDateTime>,
}

impl TryFrom<OrderRow> for Order {
    type Error = StrataError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row.status.parse().map_err(|e: String| {
            StrataError::Internal(format!("Invalid order status in database: {}", e))
        })?;

        Ok(Order {
            id: Some(OrderId::new(row.id)),
            customer_name: row.customer_name,
            product: row.product,
            quantity: row.quantity,
            price: row.price,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl EntityRepository<Order> for MySqlOrderRepository {
    async fn create(&self, order: &Order) -> StrataResult<Order> {
        debug!("Inserting order for customer: {}", order.customer_name);

        let result = sqlx::query(
            r#"
            INSERT INTO orders (customer_name, product, quantity, price, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&order.customer_name)
        .bind(&order.product)
        .bind(order.quantity)
        .bind(order.price)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(self.pool.inner())
        .await?;

        let id = OrderId::new(result.last_insert_id() as i64);
        self.find_by_id(id)
            .await?
            .ok_or_else(|| StrataError::Database(format!("Order {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: OrderId) -> StrataResult<Option<Order>> {
        debug!("Finding order by id: {}", id);

        let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Order::try_from).transpose()
    }

    async fn save(&self, order: &Order) -> StrataResult<Order> {
        let Some(id) = order.id else {
            return self.create(order).await;
        };

        debug!("Saving order: {}", id);

        // created_at is left alone on the update branch.
        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_name, product, quantity, price, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                customer_name = VALUES(customer_name),
                product = VALUES(product),
                quantity = VALUES(quantity),
                price = VALUES(price),
                status = VALUES(status),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(id.into_inner())
        .bind(&order.customer_name)
        .bind(&order.product)
        .bind(order.quantity)
        .bind(order.price)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| StrataError::Database(format!("Order {} vanished after save", id)))
    }

    async fn exists_by_id(&self, id: OrderId) -> StrataResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE id = ?")
            .bind(id.into_inner())
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: OrderId) -> StrataResult<bool> {
        debug!("Deleting order: {}", id);

        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_all(&self) -> StrataResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }
}

impl OrderRepository for MySqlOrderRepository {}
