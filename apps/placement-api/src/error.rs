//! Error types for the placement API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use placement_core::CoreError;

use crate::presenter::ErrorBody;

/// API errors.
///
/// The `Display` text is what the client sees; the wrapped detail only goes
/// to the logs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid input")]
    InvalidInput(String),

    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ApiError::InvalidInput(detail) | ApiError::Internal(detail) => detail,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidInput(detail) => ApiError::InvalidInput(detail.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(detail = %self.detail(), "request failed");
        } else {
            tracing::warn!(detail = %self.detail(), "request rejected");
        }

        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
