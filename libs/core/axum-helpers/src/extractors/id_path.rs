//! Integer path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path, rejection::PathRejection},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use std::str::FromStr;

/// Extracts a single numeric path parameter such as `/products/{id}`.
///
/// Unlike `Path<i32>`, a non-numeric segment is rejected with a JSON
/// `{"error": "Invalid id: <raw>"}` body. Domain extractors can delegate to it
/// and remap [`IdPathRejection::Invalid`] to name the resource.
///
/// ```ignore
/// async fn get_item(IdPath(id): IdPath) -> String {
///     format!("Item {}", id)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath<T = i32>(pub T);

#[derive(Debug)]
pub enum IdPathRejection {
    /// The route has no single path parameter to read
    Path(PathRejection),
    /// The segment did not parse; holds the raw text
    Invalid(String),
}

impl IntoResponse for IdPathRejection {
    fn into_response(self) -> Response {
        match self {
            IdPathRejection::Path(e) => e.into_response(),
            IdPathRejection::Invalid(raw) => {
                AppError::BadRequest(format!("Invalid id: {}", raw)).into_response()
            }
        }
    }
}

impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: FromStr + Send,
{
    type Rejection = IdPathRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IdPathRejection::Path)?;

        raw.parse::<T>()
            .map(IdPath)
            .map_err(|_| IdPathRejection::Invalid(raw))
    }
}
