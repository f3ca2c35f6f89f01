use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::orders::OrderError;
use crate::symbicode::SymbicodeError;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("order not found for payment code")]
    OrderNotFound,
    #[error("malformed order items: {0}")]
    MalformedItems(String),
    #[error("malformed shipping address: {0}")]
    MalformedShippingAddress(String),
    #[error("invalid webhook signature")]
    InvalidSignature,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl From<OrderError> for PaymentError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound => PaymentError::OrderNotFound,
            OrderError::Db(e) => PaymentError::Db(e),
            OrderError::DuplicateOrderCode => {
                PaymentError::MalformedItems("duplicate order code".to_string())
            }
        }
    }
}

impl From<SymbicodeError> for PaymentError {
    fn from(e: SymbicodeError) -> Self {
        match e {
            SymbicodeError::Db(e) => PaymentError::Db(e),
            other => PaymentError::MalformedItems(other.to_string()),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status = match self {
            PaymentError::OrderNotFound => StatusCode::NOT_FOUND,
            PaymentError::InvalidSignature => StatusCode::UNAUTHORIZED,
            PaymentError::MalformedItems(_) | PaymentError::MalformedShippingAddress(_) => {
                StatusCode::BAD_REQUEST
            }
            PaymentError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
