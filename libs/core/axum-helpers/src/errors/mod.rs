pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// { "error": "Product not found" }
/// ```
///
/// Validation failures additionally carry per-field `details`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Per-field validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Server-side failures are logged with their cause and answered with a
/// generic message; client errors echo their message back.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Multipart extraction error: {0}")]
    MultipartRejection(#[from] MultipartRejection),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Bad Gateway: {0}")]
    BadGateway(String),

    #[error("Gateway Timeout: {0}")]
    GatewayTimeout(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::JsonExtractorRejection(e) => e.status(),
            AppError::MultipartRejection(e) => e.status(),
            AppError::Multipart(e) => e.status(),
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (code, message, details) = match self {
            AppError::Database(e) => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {:?}",
                    e
                );
                (ErrorCode::DatabaseError, None, None)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (ErrorCode::InternalError, None, None)
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (ErrorCode::JsonExtraction, Some(e.body_text()), None)
            }
            AppError::MultipartRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::MultipartExtraction.code(),
                    "Multipart extraction error: {:?}",
                    e
                );
                (ErrorCode::MultipartExtraction, Some(e.body_text()), None)
            }
            AppError::Multipart(e) => {
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    ErrorCode::PayloadTooLarge
                } else {
                    ErrorCode::MultipartExtraction
                };
                tracing::warn!(error_code = code.code(), "Multipart error: {:?}", e);
                (code, Some(e.body_text()), None)
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    e
                );
                let details = serde_json::to_value(&e).ok();
                (ErrorCode::ValidationError, None, details)
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", msg);
                (ErrorCode::BadRequest, Some(msg), None)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (ErrorCode::NotFound, Some(msg), None)
            }
            AppError::BadGateway(msg) => {
                tracing::error!(
                    error_code = ErrorCode::UpstreamFailure.code(),
                    "Bad gateway: {}",
                    msg
                );
                (ErrorCode::UpstreamFailure, Some(msg), None)
            }
            AppError::GatewayTimeout(msg) => {
                tracing::error!(
                    error_code = ErrorCode::UpstreamTimeout.code(),
                    "Gateway timeout: {}",
                    msg
                );
                (ErrorCode::UpstreamTimeout, Some(msg), None)
            }
        };

        let body = ErrorResponse {
            error: message.unwrap_or_else(|| code.default_message().to_string()),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Build a JSON error response outside of [`AppError`].
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}
