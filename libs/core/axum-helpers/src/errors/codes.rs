//! Numeric error codes attached to error logs.
//!
//! Response bodies stay minimal (`{"error": ...}`); the code only travels in the
//! `error_code` field of the log event so failures can be grouped in log search.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::ValidationError.code(), 1001);
//! assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    BadRequest,
    ValidationError,
    InvalidPathParam,
    JsonExtraction,
    NotFound,
    InternalError,
    DuplicateEntry,
    RequestTimeout,
    MultipartExtraction,
    PayloadTooLarge,

    // Database errors (2000-2999)
    DatabaseError,

    // Upstream errors (6000s)
    UpstreamFailure,
    UpstreamTimeout,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidPathParam => "INVALID_PATH_PARAM",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DuplicateEntry => "DUPLICATE_ENTRY",
            Self::RequestTimeout => "REQUEST_TIMEOUT",
            Self::MultipartExtraction => "MULTIPART_EXTRACTION",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::UpstreamFailure => "UPSTREAM_FAILURE",
            Self::UpstreamTimeout => "UPSTREAM_TIMEOUT",
        }
    }

    /// Integer code used in structured logs.
    ///
    /// - 1000-1999: client errors
    /// - 2000-2999: database errors
    /// - 6000-6999: upstream service errors
    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 1000,
            Self::ValidationError => 1001,
            Self::InvalidPathParam => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::DuplicateEntry => 1008,
            Self::RequestTimeout => 1011,
            Self::MultipartExtraction => 1012,
            Self::PayloadTooLarge => 1013,
            Self::DatabaseError => 2003,
            Self::UpstreamFailure => 6001,
            Self::UpstreamTimeout => 6002,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request",
            Self::ValidationError => "Request validation failed",
            Self::InvalidPathParam => "Invalid path parameter",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "The requested resource was not found",
            Self::InternalError => "An unexpected error occurred",
            Self::DuplicateEntry => "Duplicate entry",
            Self::RequestTimeout => "Request timed out",
            Self::MultipartExtraction => "Failed to read multipart form",
            Self::PayloadTooLarge => "Request body is too large",
            Self::DatabaseError => "An unexpected error occurred",
            Self::UpstreamFailure => "Upstream service failed",
            Self::UpstreamTimeout => "Upstream service timed out",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
