//! Readiness endpoint
//!
//! Liveness (`/health`) comes from `axum_helpers::health_router`; this adds
//! `/ready`, which only succeeds while the database answers.

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let database: HealthCheckFuture =
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) });

    run_health_checks(vec![("database", database)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
