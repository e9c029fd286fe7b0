//! API routes module

pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Plain-text greeting served at the root
async fn welcome() -> &'static str {
    "Welcome API!"
}

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    compose(products::router(state), health::router(state.clone()))
}

fn compose(products: Router, ready: Router) -> Router {
    Router::new()
        .route("/", get(welcome))
        .nest("/products", products)
        .merge(ready)
}
