//! Product service implementation.

use crate::accessor::{CacheAsideAccessor, CacheSettings};
use crate::cache::CacheInterface;
use crate::dto::{CreateProductRequest, UpdateProductRequest};
use crate::metrics::AccessMetrics;
use crate::product_service::ProductService;
use async_trait::async_trait;
use std::sync::Arc;
use strata_core::{Product, ProductId, StrataResult, ValidateExt};
use strata_repository::ProductRepository;
use tracing::debug;

/// Product service over a cache-aside accessor.
pub struct ProductServiceImpl<R: ProductRepository + ?Sized> {
    accessor: CacheAsideAccessor<Product, R>,
}

impl<R: ProductRepository + ?Sized> ProductServiceImpl<R> {
    /// Creates a new product service.
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheInterface>,
        metrics: Arc<dyn AccessMetrics>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            accessor: CacheAsideAccessor::new(repository, cache, metrics, settings),
        }
    }
}

#[async_trait]
impl<R: ProductRepository + ?Sized + 'static> ProductService for ProductServiceImpl<R> {
    async fn get_product(&self, id: ProductId) -> StrataResult<Product> {
        debug!("Getting product: {}", id);
        self.accessor.read(id).await
    }

    async fn create_product(&self, request: CreateProductRequest) -> StrataResult<Product> {
        debug!("Creating product: {}", request.name);
        request.validate_request()?;
        self.accessor.create(Product::from(request)).await
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> StrataResult<Product> {
        debug!("Updating product: {}", id);
        request.validate_request()?;

        if request.is_empty() {
            debug!("Update for product {} carries no fields", id);
        }

        self.accessor
            .update(id, move |product| {
                product.apply_patch(request.name, request.price);
            })
            .await
    }

    async fn delete_product(&self, id: ProductId) -> StrataResult<()> {
        debug!("Deleting product: {}", id);
        self.accessor.delete(id).await
    }
}

impl<R: ProductRepository + ?Sized> std::fmt::Debug for ProductServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl").finish_non_exhaustive()
    }
}
