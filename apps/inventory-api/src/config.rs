//! Configuration for Inventory API

use core_config::{AppInfo, FromEnv, app_info, env_parse_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_products::CloudinaryConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub cloudinary: CloudinaryConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Cap on a create request body, image included
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - DATABASE_URL
        let cloudinary = CloudinaryConfig::from_env()?; // Required - CLOUDINARY_* credentials
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        let max_upload_bytes = env_parse_or_default(
            "MAX_UPLOAD_BYTES",
            &domain_products::handlers::DEFAULT_MAX_UPLOAD_BYTES.to_string(),
        )?;

        // The upload deadline only starts once the body is read, so the
        // request deadline has to leave room for it.
        if server.request_timeout_secs <= cloudinary.upload_timeout_secs {
            eyre::bail!(
                "REQUEST_TIMEOUT_SECS ({}) must be greater than CLOUDINARY_UPLOAD_TIMEOUT_SECS ({})",
                server.request_timeout_secs,
                cloudinary.upload_timeout_secs
            );
        }

        Ok(Self {
            app: app_info!(),
            database,
            cloudinary,
            server,
            environment,
            max_upload_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [(&str, Option<&str>); 4] = [
        ("DATABASE_URL", Some("postgres://localhost/inventory")),
        ("CLOUDINARY_CLOUD_NAME", Some("demo")),
        ("CLOUDINARY_API_KEY", Some("key")),
        ("CLOUDINARY_API_SECRET", Some("secret")),
    ];

    #[test]
    fn test_from_env_defaults() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("MAX_UPLOAD_BYTES", None));
        vars.push(("PORT", None));
        vars.push(("REQUEST_TIMEOUT_SECS", None));
        vars.push(("CLOUDINARY_UPLOAD_TIMEOUT_SECS", None));

        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.app.name, "inventory_api");
            assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.cloudinary.folder, "imgs-products-store");
            assert!(config.server.request_timeout() > config.cloudinary.upload_timeout());
        });
    }

    #[test]
    fn test_from_env_rejects_request_timeout_not_above_upload_timeout() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("REQUEST_TIMEOUT_SECS", Some("30")));
        vars.push(("CLOUDINARY_UPLOAD_TIMEOUT_SECS", Some("30")));

        temp_env::with_vars(vars, || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS (30)"));
        });
    }

    #[test]
    fn test_from_env_upload_limit_override() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("MAX_UPLOAD_BYTES", Some("2048")));
        vars.push(("REQUEST_TIMEOUT_SECS", None));
        vars.push(("CLOUDINARY_UPLOAD_TIMEOUT_SECS", None));

        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.max_upload_bytes, 2048);
        });
    }

    #[test]
    fn test_from_env_requires_database_url() {
        let mut vars = REQUIRED.to_vec();
        vars[0] = ("DATABASE_URL", None);

        temp_env::with_vars(vars, || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }
}
