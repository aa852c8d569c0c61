//! Back-office order routes: listing, detail, and status transitions.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use drplanet_core::{Order, OrderItem, OrderStatus};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: u32 = 50;
const MAX_LIST_LIMIT: u32 = 200;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<OrderStatus>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// An order with its line items, as returned to clients.
#[derive(Debug, Serialize)]
pub struct OrderBody {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// `GET /api/orders?status=&limit=` - orders, newest first, optionally
/// filtered to a single status.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Order>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
    let orders = state.db.orders().list(params.status, limit).await?;
    Ok(Json(orders))
}

/// `GET /api/orders/{id}` - order with line items.
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<OrderBody>> {
    let (order, items) = state
        .db
        .orders()
        .get_with_items(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order not found: {id}")))?;

    Ok(Json(OrderBody { order, items }))
}

/// `PATCH /api/orders/{id}/status` - move an order through its lifecycle.
///
/// The repository enforces the transition rules; a disallowed move comes
/// back as a 422 with the from/to pair in the message.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Order>> {
    let order = state.db.orders().update_status(&id, req.status).await?;

    info!(order_id = %order.id, status = ?order.status, "Order status updated");

    Ok(Json(order))
}
