use axum::extract::multipart::MultipartError;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

use crate::media::MediaError;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i32),

    #[error("Duplicate entry")]
    DuplicateEntry,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid fields: {0}")]
    InvalidFields(#[from] ValidationErrors),

    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Upload(#[from] MediaError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::DuplicateEntry => AppError::BadRequest("Duplicate entry".to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::InvalidFields(e) => AppError::ValidationError(e),
            ProductError::Multipart(e) => AppError::Multipart(e),
            ProductError::Upload(e @ MediaError::Timeout(_)) => {
                AppError::GatewayTimeout(e.to_string())
            }
            ProductError::Upload(e) => AppError::BadGateway(e.to_string()),
            ProductError::Database(e) => AppError::Database(e),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
