//! MySQL product repository implementation.

use crate::{DatabasePoolInterface, EntityRepository, ProductRepository};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use strata_core::{Product, ProductId, StrataError, StrataResult};
use tracing::debug;

/// MySQL product repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ProductRepository)]
pub struct MySqlProductRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlProductRepository {
    /// Creates a new MySQL product repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
    updated_at: Option<NaiveDateTime>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: Some(ProductId::new(row.id)),
            name: row.name,
            price: row.price,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl EntityRepository<Product> for MySqlProductRepository {
    async fn create(&self, product: &Product) -> StrataResult<Product> {
        debug!("Inserting product: {}", product.name);

        let result = sqlx::query("INSERT INTO products (name, price, updated_at) VALUES (?, ?, ?)")
            .bind(&product.name)
            .bind(product.price)
            .bind(product.updated_at)
            .execute(self.pool.inner())
            .await?;

        let id = ProductId::new(result.last_insert_id() as i64);
        self.find_by_id(id).await?.ok_or_else(|| {
            StrataError::Database(format!("Product {} vanished after insert", id))
        })
    }

    async fn find_by_id(&self, id: ProductId) -> StrataResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, updated_at FROM products WHERE id = ?",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn save(&self, product: &Product) -> StrataResult<Product> {
        let Some(id) = product.id else {
            return self.create(product).await;
        };

        debug!("Saving product: {}", id);

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, updated_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                name = VALUES(name),
                price = VALUES(price),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(id.into_inner())
        .bind(&product.name)
        .bind(product.price)
        .bind(product.updated_at)
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| StrataError::Database(format!("Product {} vanished after save", id)))
    }

    async fn exists_by_id(&self, id: ProductId) -> StrataResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE id = ?")
            .bind(id.into_inner())
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: ProductId) -> StrataResult<bool> {
        debug!("Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_all(&self) -> StrataResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, updated_at FROM products ORDER BY id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

impl ProductRepository for MySqlProductRepository {}
