//! Product service trait definition.

use crate::dto::{CreateProductRequest, UpdateProductRequest};
use async_trait::async_trait;
use strata_core::{Interface, Product, ProductId, StrataResult};

/// Product catalog operations, served cache-aside.
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Gets a product by ID, from the cache when present.
    async fn get_product(&self, id: ProductId) -> StrataResult<Product>;

    /// Creates a product.
    async fn create_product(&self, request: CreateProductRequest) -> StrataResult<Product>;

    /// Applies a partial update and invalidates the cached entry.
    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> StrataResult<Product>;

    /// Deletes a product and invalidates the cached entry.
    async fn delete_product(&self, id: ProductId) -> StrataResult<()>;
}
