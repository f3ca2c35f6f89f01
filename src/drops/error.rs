use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DropError {
    #[error("limited drop not found")]
    NotFound,
    #[error("limited drop is sold out")]
    SoldOut,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl IntoResponse for DropError {
    fn into_response(self) -> Response {
        let status = match self {
            DropError::NotFound => StatusCode::NOT_FOUND,
            DropError::SoldOut => StatusCode::CONFLICT,
            DropError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
