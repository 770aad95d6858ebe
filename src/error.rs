use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::services::sizing_algorithm::SizingError;

/// Errors returned from HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Sizing(#[from] SizingError),
}

/// Error response that gets serialized to JSON
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Sizing(SizingError::InvalidGeometry(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::Sizing(SizingError::InvalidGeometry(_)) => "InvalidGeometry",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "client error");
        let body = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
