use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{not_found, request_timed_out};
use crate::http::{create_cors_layer, security_headers};
use axum::{Router, http::StatusCode, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Wrap the API routes with documentation and cross-cutting middleware.
///
/// Adds:
/// - OpenAPI JSON at `/api-docs/openapi.json` with Swagger UI (`/swagger-ui`),
///   ReDoc (`/redoc`), RapiDoc (`/rapidoc`) and Scalar (`/scalar`)
/// - JSON 404 fallback
/// - request tracing, per-request timeout, security headers, CORS, compression
///
/// Requests running past `request_timeout_secs` are answered with
/// `504 {"error":"Request timed out"}`.
///
/// `apis` is merged at the root and must already have its state applied.
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            server_config.request_timeout(),
        ))
        .layer(middleware::map_response(request_timed_out))
        .layer(middleware::from_fn(security_headers))
        .layer(create_cors_layer(&server_config.cors_allowed_origins))
        .layer(CompressionLayer::new())
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup`.
///
/// In-flight requests are drained first; `cleanup` (closing pools and the
/// like) is then given at most `shutdown_timeout` before the process moves on.
///
/// ```ignore
/// let cleanup = async move {
///     if let Err(e) = database::postgres::close(db).await {
///         tracing::error!("Failed to close pool: {}", e);
///     }
/// };
/// create_production_app(router, &config.server, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::default();
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
