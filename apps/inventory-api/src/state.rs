//! Application state management

use domain_products::CloudinaryUploader;
use sea_orm::DatabaseConnection;

/// Shared application state, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
    pub uploader: CloudinaryUploader,
}
