use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::EngineError;

/// Errors surfaced by the REST handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::Engine(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.kind()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad-request"),
        };

        let body = Json(json!({
            "error": self.to_string(),
            "kind": kind,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_unprocessable() {
        let err = ApiError::from(EngineError::InsufficientData {
            stage: "aligner",
            available: 3,
            required: 50,
        });
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = ApiError::BadRequest("symbol is required".into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
