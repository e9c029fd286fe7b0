//! Inventory API - product CRUD over REST

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::CloudinaryUploader;
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;

    let uploader = CloudinaryUploader::new(config.cloudinary.clone())?;
    info!(
        cloud_name = %config.cloudinary.cloud_name,
        folder = %config.cloudinary.folder,
        "Media uploader configured"
    );

    let state = AppState {
        config,
        db,
        uploader,
    };

    // - /health: liveness check with app name/version
    // - /ready: readiness check against the database
    let api_routes = api::routes(&state).merge(health_router(state.config.app));

    // create_router adds docs/middleware to our composed routes
    let app = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.server);

    info!("Starting Inventory API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            if let Err(e) = database::postgres::close(state.db).await {
                tracing::error!("Error closing PostgreSQL: {}", e);
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Inventory API shutdown complete");
    Ok(())
}
