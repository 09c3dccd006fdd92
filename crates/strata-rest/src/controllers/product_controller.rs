//! Product catalog controller.

use crate::{
    extractors::ValidatedJson,
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use strata_core::{Product, ProductId, StrataError};
use strata_service::{CreateProductRequest, UpdateProductRequest};
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Get a product by ID.
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Product> {
    debug!("Get product request: {}", id);

    let product_id = parse_product_id(&id)?;
    let product = state.product_service.get_product(product_id).await?;
    ok(product)
}

/// Create a new product.
async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), AppError> {
    debug!("Create product request: {}", request.name);

    let product = state.product_service.create_product(request).await?;
    Ok(created(product))
}

/// Partially update a product.
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProductRequest>,
) -> ApiResult<Product> {
    debug!("Update product request: {}", id);

    let product_id = parse_product_id(&id)?;
    let product = state
        .product_service
        .update_product(product_id, request)
        .await?;
    ok(product)
}

/// Delete a product.
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete product request: {}", id);

    let product_id = parse_product_id(&id)?;
    state.product_service.delete_product(product_id).await?;
    Ok(no_content())
}

fn parse_product_id(id: &str) -> Result<ProductId, AppError> {
    ProductId::parse(id)
        .map_err(|_| AppError(StrataError::Validation(format!("Invalid product ID: {}", id))))
}
