//! Products API routes

use axum::Router;
use domain_products::{PgProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create products router backed by Postgres and the configured media host
pub fn router(state: &AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let service = ProductService::new(repository, state.uploader.clone())
        .with_folder(state.config.cloudinary.folder.clone())
        .with_upload_timeout(state.config.cloudinary.upload_timeout());
    handlers::router(service, state.config.max_upload_bytes)
}
