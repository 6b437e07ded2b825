//! Server configuration
//!
//! All settings are read from the environment exactly once, at process
//! start. Required values are validated together so a misconfigured
//! deployment fails at boot with the full list of missing variables
//! instead of failing one request at a time.
//!
//! | Variable | Default | Notes |
//! |----------|---------|-------|
//! | WORK_DIR | ./data | database + log location |
//! | HTTP_PORT | 3000 | |
//! | DATABASE_PATH | {work_dir}/leafclutch.db | SQLite file |
//! | ENVIRONMENT | development | |
//! | JWT_SECRET | (required) | at least 32 chars |
//! | JWT_EXPIRATION_MINUTES | 120 | |
//! | JWT_ISSUER | leafclutch-server | |
//! | JWT_AUDIENCE | leafclutch-admin | |
//! | ADMIN_USERNAME | admin | first-boot seed |
//! | ADMIN_PASSWORD | (unset) | seed skipped when unset |
//! | APPWRITE_ENDPOINT | (required) | storage provider |
//! | APPWRITE_PROJECT_ID | (required) | |
//! | APPWRITE_API_KEY | (required) | |
//! | APPWRITE_BUCKET_ID | (required) | |
//! | CLOUDINARY_CLOUD_NAME | (unset) | signed-upload provider |
//! | CLOUDINARY_API_KEY | (unset) | |
//! | CLOUDINARY_API_SECRET | (unset) | checked per request, not at boot |

use crate::auth::JwtConfig;
use thiserror::Error;

/// Minimum accepted JWT secret length
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Object-storage provider settings (server-proxied uploads)
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub bucket_id: String,
}

/// Signed-upload provider settings (browser uploads directly to the CDN).
///
/// All fields are optional: the signature endpoint reports a configuration
/// error at request time when the secret is absent, matching how the rest
/// of the deployment treats this provider as an optional add-on.
#[derive(Debug, Clone, Default)]
pub struct MediaSigningConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// JWT settings
    pub jwt: JwtConfig,
    /// First-boot admin seed username
    pub admin_username: String,
    /// First-boot admin seed password (seed skipped when unset)
    pub admin_password: Option<String>,
    /// Object-storage provider (required)
    pub storage: StorageConfig,
    /// Signed-upload provider (optional)
    pub media_signing: MediaSigningConfig,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Load and validate configuration from the environment.
    ///
    /// Collects every missing required variable before failing so one boot
    /// attempt reports the complete problem.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let mut require = |name: &str| {
            env_var(name).unwrap_or_else(|| {
                missing.push(name.to_string());
                String::new()
            })
        };

        let jwt_secret = require("JWT_SECRET");
        let storage = StorageConfig {
            endpoint: require("APPWRITE_ENDPOINT"),
            project_id: require("APPWRITE_PROJECT_ID"),
            api_key: require("APPWRITE_API_KEY"),
            bucket_id: require("APPWRITE_BUCKET_ID"),
        };

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::Invalid(format!(
                "JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters long"
            )));
        }

        let work_dir = env_var("WORK_DIR").unwrap_or_else(|| "./data".into());
        let database_path =
            env_var("DATABASE_PATH").unwrap_or_else(|| format!("{work_dir}/leafclutch.db"));

        Ok(Self {
            http_port: env_var("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            environment: env_var("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            jwt: JwtConfig {
                secret: jwt_secret,
                expiration_minutes: env_var("JWT_EXPIRATION_MINUTES")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(120),
                issuer: env_var("JWT_ISSUER").unwrap_or_else(|| "leafclutch-server".into()),
                audience: env_var("JWT_AUDIENCE").unwrap_or_else(|| "leafclutch-admin".into()),
            },
            admin_username: env_var("ADMIN_USERNAME").unwrap_or_else(|| "admin".into()),
            admin_password: env_var("ADMIN_PASSWORD"),
            storage,
            media_signing: MediaSigningConfig {
                cloud_name: env_var("CLOUDINARY_CLOUD_NAME"),
                api_key: env_var("CLOUDINARY_API_KEY"),
                api_secret: env_var("CLOUDINARY_API_SECRET"),
            },
            work_dir,
        })
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
