use axum::{
    http::{StatusCode, header},
    response::Response,
};

use super::{ErrorCode, error_response};

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, ErrorCode::NotFound.default_message())
}

/// Gives the bodiless 504 of the request timeout layer a JSON error body.
///
/// Handler-produced 504s already carry a content type and pass through.
pub async fn request_timed_out(response: Response) -> Response {
    if response.status() == StatusCode::GATEWAY_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        return error_response(
            StatusCode::GATEWAY_TIMEOUT,
            ErrorCode::RequestTimeout.default_message(),
        );
    }
    response
}
