//! Error types for the Quakewatch API.
//!
//! [`ApiError`] unifies handler failures into a single enum that converts
//! into an Axum HTTP response with a JSON `{error, status}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quake_types::PolygonError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request body or parameters were unusable.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A shape id could not be parsed from the request path.
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),

    /// The submitted vertices do not form a polygon.
    #[error("invalid polygon: {0}")]
    InvalidPolygon(#[from] PolygonError),

    /// A background task failed before producing its result.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) | Self::InvalidUuid(_) => StatusCode::BAD_REQUEST,
            Self::InvalidPolygon(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
