pub mod books;
pub mod health;
pub mod search;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::responses::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Out-of-range or missing request fields. Client error, never logged as a
    /// system failure.
    #[error("{0}")]
    Validation(String),
    /// Undecodable request body (bad JSON, broken multipart stream).
    #[error("invalid request body: {0}")]
    Body(String),
    /// Disk write failed while persisting an upload; add-book cannot claim
    /// success without the file.
    #[error("failed to store uploaded file: {0}")]
    Upload(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) | ApiError::Body(_) => StatusCode::BAD_REQUEST,
            ApiError::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}
