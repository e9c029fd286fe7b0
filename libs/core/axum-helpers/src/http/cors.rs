use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the CORS layer for a list of allowed origins.
///
/// An empty list accepts any origin, which matches a public catalogue API
/// with no credentials. Origins that are not valid header values are
/// skipped with a warning.
pub fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        tracing::info!("CORS configured to allow any origin");
        return create_permissive_cors_layer();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin: {}", e);
                None
            }
        })
        .collect();

    tracing::info!("CORS configured with allowed origins: {:?}", allowed_origins);

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    async fn preflight(layer: CorsLayer, origin: &str) -> Option<HeaderValue> {
        let app = Router::new().route("/products", get(|| async { "ok" })).layer(layer);
        let response = app
            .oneshot(
                Request::get("/products")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn test_empty_list_allows_any_origin() {
        let allowed = preflight(create_cors_layer(&[]), "http://anywhere.test").await;
        assert_eq!(allowed, Some(HeaderValue::from_static("*")));
    }

    #[tokio::test]
    async fn test_listed_origin_is_echoed() {
        let layer = create_cors_layer(&["http://localhost:3000".to_string()]);
        let allowed = preflight(layer, "http://localhost:3000").await;
        assert_eq!(allowed, Some(HeaderValue::from_static("http://localhost:3000")));
    }

    #[tokio::test]
    async fn test_unlisted_origin_is_not_allowed() {
        let layer = create_cors_layer(&["http://localhost:3000".to_string()]);
        assert_eq!(preflight(layer, "http://evil.test").await, None);
    }
}
