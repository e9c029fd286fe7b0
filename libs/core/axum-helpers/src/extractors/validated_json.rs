//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that runs `Validate::validate` after deserializing.
///
/// Malformed bodies are rejected with the status axum's `Json` extractor
/// chooses; rule violations become a 400 with per-field `details`.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct Rename {
///     #[validate(length(min = 1, max = 100))]
///     name: String,
/// }
///
/// async fn rename(ValidatedJson(body): ValidatedJson<Rename>) -> String {
///     body.name
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Restock {
        #[validate(range(min = 0))]
        quantity: i32,
    }

    async fn restock(ValidatedJson(body): ValidatedJson<Restock>) -> String {
        body.quantity.to_string()
    }

    async fn send(body: &str) -> (StatusCode, String) {
        let app = Router::new().route("/restock", post(restock));
        let response = app
            .oneshot(
                Request::post("/restock")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let (status, body) = send(r#"{"quantity": 3}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "3");
    }

    #[tokio::test]
    async fn test_rule_violation_returns_details() {
        let (status, body) = send(r#"{"quantity": -1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Request validation failed");
        assert!(json["details"]["quantity"].is_array());
    }

    #[tokio::test]
    async fn test_missing_field_is_client_error() {
        let (status, body) = send(r#"{}"#).await;
        assert!(status.is_client_error());

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("quantity"));
    }
}
