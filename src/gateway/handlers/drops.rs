//! Drop catalog and purchase endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::drops::{Drop, DropError, DropRepository};
use crate::purchase::{PurchaseError, PurchaseRequest, PurchaseResult};

use super::super::state::AppState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DropStatusResponse {
    #[serde(flatten)]
    pub drop: Drop,
    /// `max(0, total_stock - sold)`; never goes negative even if a
    /// compensating decrement races a reader.
    pub available: i64,
    pub now: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/api/drops",
    responses((status = 200, description = "Active limited drops", body = [Drop])),
    tag = "Drops"
)]
pub async fn list_active_drops(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Drop>>, DropError> {
    let executor = state.db.executor();
    let drops = DropRepository::new(&executor).list_active().await?;
    Ok(Json(drops))
}

#[utoipa::path(
    get,
    path = "/api/drops/{id}/status",
    params(("id" = i64, Path, description = "Drop id")),
    responses(
        (status = 200, description = "Drop status", body = DropStatusResponse),
        (status = 404, description = "Drop not found")
    ),
    tag = "Drops"
)]
pub async fn get_drop_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DropStatusResponse>, DropError> {
    let executor = state.db.executor();
    let drop = DropRepository::new(&executor).get_by_id(id).await?;
    let available = (drop.total_stock - drop.sold).max(0);
    Ok(Json(DropStatusResponse {
        drop,
        available,
        now: Utc::now(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/drops/{id}/purchase",
    params(("id" = i64, Path, description = "Drop id")),
    request_body = PurchaseRequest,
    responses(
        (status = 200, description = "Checkout created", body = PurchaseResult),
        (status = 400, description = "Validation failure or drop sold out, ended, inactive, or size limit reached")
    ),
    tag = "Drops"
)]
pub async fn purchase_drop(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<PurchaseRequest>,
) -> Result<Json<PurchaseResult>, PurchaseError> {
    let result = state.purchase_service().purchase(id, &request).await?;
    Ok(Json(result))
}
