//! PostgreSQL connection management on top of SeaORM.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{
    close, connect_from_config, connect_from_config_with_retry, connect_with_options,
    run_migrations,
};
pub use health::check_health;

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
