//! Read-only order lookups: single order by id, and order history by phone.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::orders::{Order, OrderError, OrderRepository};

use super::super::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct OrdersByPhoneQuery {
    pub phone: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrdersByPhoneResponse {
    pub orders: Vec<Order>,
    pub count: usize,
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 404, description = "Order not found")
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, OrderError> {
    let executor = state.db.executor();
    let order = OrderRepository::new(&executor).get_by_id(id).await?;
    Ok(Json(order))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(OrdersByPhoneQuery),
    responses((status = 200, description = "Order history for a phone number", body = OrdersByPhoneResponse)),
    tag = "Orders"
)]
pub async fn get_orders_by_phone(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OrdersByPhoneQuery>,
) -> Result<Json<OrdersByPhoneResponse>, OrderError> {
    let executor = state.db.executor();
    let orders = OrderRepository::new(&executor)
        .list_by_phone(&params.phone)
        .await?;
    let count = orders.len();
    Ok(Json(OrdersByPhoneResponse { orders, count }))
}
