use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SymbicodeError {
    #[error("symbicode not found")]
    NotFound,
    #[error("invalid symbicode format")]
    InvalidFormat,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl IntoResponse for SymbicodeError {
    fn into_response(self) -> Response {
        let status = match self {
            // The verify endpoint's only documented failure mode is 400: an
            // unknown code is indistinguishable from a malformed one to the
            // caller, since both just mean "not a valid symbicode".
            SymbicodeError::NotFound | SymbicodeError::InvalidFormat => StatusCode::BAD_REQUEST,
            SymbicodeError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
