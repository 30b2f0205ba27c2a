//! Web API error types and their HTTP response conversions.
//!
//! Uses thiserror for the error enum and Axum's `IntoResponse` for the HTTP
//! mapping. Domain errors funnel in through `From<TarefasError>`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::TarefasError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {message}")]
    BadRequest { message: String },

    #[error("task not found")]
    NotFound,

    #[error("internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<TarefasError> for ApiError {
    fn from(err: TarefasError) -> Self {
        match err {
            TarefasError::InvalidRequest(_) | TarefasError::DuplicateName(_) => {
                Self::bad_request(err.to_string())
            }
            TarefasError::NotFound(_) => Self::NotFound,
            // Server-side invariant failures, not user-correctable here.
            TarefasError::ConstraintViolation(_) | TarefasError::StoreUnavailable(_) => {
                Self::internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_code, message) = match &self {
            ApiError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message.clone())
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "task not found".to_string(),
            ),
            ApiError::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                message.clone(),
            ),
        };

        let body = Json(json!({
            "error": error_code,
            "message": message,
        }));

        (status_code, body).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
