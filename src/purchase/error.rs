use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::drops::DropError;
use crate::notifications::gateway_client::PaymentGatewayError;
use crate::orders::OrderError;
use crate::products::ProductError;

#[derive(Debug, Error)]
pub enum PurchaseError {
    #[error("field '{0}' is required")]
    MissingField(&'static str),
    #[error("quantity must be greater than zero")]
    InvalidQuantity,
    #[error("limited drop is not active")]
    DropInactive,
    #[error("limited drop has not started yet")]
    NotStarted,
    #[error("limited drop has ended")]
    Ended,
    #[error("limited drop is sold out")]
    SoldOut,
    #[error("limited drop size limit reached")]
    DropSizeLimit,
    #[error("product not found")]
    ProductNotFound,
    #[error("failed to create local order: {0}")]
    OrderCreation(String),
    #[error("failed to create checkout: {0}")]
    Checkout(String),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl From<DropError> for PurchaseError {
    fn from(e: DropError) -> Self {
        match e {
            DropError::NotFound => PurchaseError::DropInactive,
            DropError::SoldOut => PurchaseError::SoldOut,
            DropError::Db(e) => PurchaseError::Db(e),
        }
    }
}

impl From<ProductError> for PurchaseError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound => PurchaseError::ProductNotFound,
            ProductError::Db(e) => PurchaseError::Db(e),
        }
    }
}

impl From<OrderError> for PurchaseError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Db(e) => PurchaseError::Db(e),
            other => PurchaseError::OrderCreation(other.to_string()),
        }
    }
}

impl From<PaymentGatewayError> for PurchaseError {
    fn from(e: PaymentGatewayError) -> Self {
        PurchaseError::Checkout(e.to_string())
    }
}

impl IntoResponse for PurchaseError {
    fn into_response(self) -> Response {
        // spec.md §6/§7: every phase-1 failure — field validation and
        // drop-state alike (inactive/not-started/ended/size-exceeded) — is
        // 400, with no other status for this endpoint.
        let status = match self {
            PurchaseError::MissingField(_)
            | PurchaseError::InvalidQuantity
            | PurchaseError::ProductNotFound
            | PurchaseError::DropInactive
            | PurchaseError::NotStarted
            | PurchaseError::Ended
            | PurchaseError::SoldOut
            | PurchaseError::DropSizeLimit => StatusCode::BAD_REQUEST,
            PurchaseError::OrderCreation(_) | PurchaseError::Checkout(_) | PurchaseError::Db(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
