//! Order controller.

use crate::{
    extractors::ValidatedJson,
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use strata_core::{Order, OrderId, StrataError};
use strata_service::OrderRequest;
use tracing::debug;

/// Creates the order router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order).put(update_order).delete(delete_order))
}

/// List all orders.
async fn list_orders(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    debug!("List orders request");

    let orders = state.order_service.list_orders().await?;
    ok(orders)
}

/// Create a new order.
async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<OrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Order>>), AppError> {
    debug!("Create order request for: {}", request.customer_name);

    let order = state.order_service.create_order(request).await?;
    Ok(created(order))
}

/// Get an order by ID.
async fn get_order(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Order> {
    debug!("Get order request: {}", id);

    let order_id = parse_order_id(&id)?;
    let order = state.order_service.get_order(order_id).await?;
    ok(order)
}

/// Replace an order's fields.
async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<OrderRequest>,
) -> ApiResult<Order> {
    debug!("Update order request: {}", id);

    let order_id = parse_order_id(&id)?;
    let order = state.order_service.update_order(order_id, request).await?;
    ok(order)
}

/// Delete an order.
async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete order request: {}", id);

    let order_id = parse_order_id(&id)?;
    state.order_service.delete_order(order_id).await?;
    Ok(no_content())
}

fn parse_order_id(id: &str) -> Result<OrderId, AppError> {
    OrderId::parse(id)
        .map_err(|_| AppError(StrataError::Validation(format!("Invalid order ID: {}", id))))
}
