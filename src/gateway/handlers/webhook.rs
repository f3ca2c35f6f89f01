//! Inbound payment-gateway webhook. Reads the raw body once, verifies the
//! signature over those exact bytes, then deserializes the same buffer.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use bytes::Bytes;
use serde_json::json;

use crate::notifications::gateway_client::verify_signature;
use crate::payment::webhook::WebhookPayload;

use super::super::state::AppState;

const SIGNATURE_HEADER: &str = "x-signature";

#[utoipa::path(
    post,
    path = "/api/payments/webhook",
    responses(
        (status = 200, description = "Payment processed or acknowledged"),
        (status = 400, description = "Malformed webhook payload"),
        (status = 401, description = "Invalid webhook signature"),
        (status = 500, description = "Internal error, gateway should retry")
    ),
    tag = "Payments"
)]
pub async fn payment_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    // Dev-mode bypass mirrors mock gateway behavior: without real
    // credentials configured there's no checksum key to verify against.
    if !state.payos_checksum_key.is_empty() {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !verify_signature(&body, &state.payos_checksum_key, signature) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "invalid signature" })),
            );
        }
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "malformed webhook payload" })),
            );
        }
    };

    if !payload.is_paid() {
        return (
            StatusCode::OK,
            Json(json!({ "message": "Payment not completed" })),
        );
    }

    match state.payment_service().confirm_payment(payload.data.order_code).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Payment processed successfully" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, order_code = payload.data.order_code, "payment confirmation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal Server Error, please retry" })),
            )
        }
    }
}
