//! Symbicode verification endpoint: the anti-counterfeit activation check.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{ConnectInfo, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::symbicode::{Symbicode, SymbicodeError, SymbicodeService};

use super::super::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyRequest {
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub token: Symbicode,
    pub is_first_activation: bool,
}

#[utoipa::path(
    post,
    path = "/api/symbicode/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Token verified/activated", body = VerifyResponse),
        (status = 400, description = "Malformed or unknown code")
    ),
    tag = "Symbicode"
)]
pub async fn verify_symbicode(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, SymbicodeError> {
    let executor = state.db.executor();
    let service = SymbicodeService::new(&executor);
    let (token, is_first_activation) = service
        .verify(&request.code, Some(&addr.ip().to_string()))
        .await?;
    Ok(Json(VerifyResponse {
        token,
        is_first_activation,
    }))
}
