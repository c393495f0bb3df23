//! Mapping of domain errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::error::StoreError;

/// Error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: &'static str,
}

/// Error returned from API handlers.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            StoreError::NotFound { id } => {
                debug!(?id, "user not found");
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: "User not found",
                    }),
                )
                    .into_response()
            }
        }
    }
}
