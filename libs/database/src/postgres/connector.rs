use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

/// Open a pool from a [`PostgresConfig`] in a single attempt.
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Open a pool, retrying with backoff while the server is unreachable.
///
/// Uses [`RetryConfig::default`] when `retry_config` is `None`.
///
/// ```ignore
/// let config = PostgresConfig::from_env()?;
/// let db = connect_from_config_with_retry(config, None).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<DatabaseConnection> {
    let options = config.into_connect_options();
    let retry_config = retry_config.unwrap_or_default();
    let attempts = retry_config.max_retries + 1;

    retry_with_backoff(|| connect_with_options(options.clone()), retry_config)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(format!("{} attempts: {}", attempts, e)))
}

/// Apply all pending migrations of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}

/// Close the pool, waiting for checked-out connections to be returned.
pub async fn close(db: DatabaseConnection) -> Result<(), DbErr> {
    db.close().await?;
    info!("PostgreSQL connection pool closed");
    Ok(())
}
