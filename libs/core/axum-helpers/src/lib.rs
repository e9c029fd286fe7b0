//! # Axum Helpers
//!
//! Shared HTTP plumbing for the inventory services.
//!
//! - **[`server`]**: router assembly with OpenAPI viewers, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: `AppError` and the `{"error": ...}` response body
//! - **[`extractors`]**: validated JSON and numeric path extractors

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, error_response};

pub use extractors::{IdPath, IdPathRejection, ValidatedJson};
