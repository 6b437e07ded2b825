//! Server state
//!
//! Holds the shared service handles: configuration, database pool, JWT
//! service and the storage client. Cloned per request via Arc-backed
//! fields, so ownership cost is negligible.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::AdminUser;
use crate::db::repository::admin_user;
use crate::storage::StorageClient;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable after boot)
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// Object-storage client
    pub storage: StorageClient,
}

impl ServerState {
    /// Initialize server state:
    /// 1. ensure the work directory exists
    /// 2. open the database (runs migrations)
    /// 3. seed the first admin account when the table is empty
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db = DbService::new(&config.database_path).await?;
        let state = Self::with_pool(config.clone(), db.pool);
        state.seed_admin().await?;
        Ok(state)
    }

    /// Build state over an existing pool (used by tests)
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        Self {
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            storage: StorageClient::new(config.storage.clone()),
            config,
            pool,
        }
    }

    /// Create the first admin account from ADMIN_USERNAME/ADMIN_PASSWORD.
    /// Skipped when an account already exists or no password was supplied.
    async fn seed_admin(&self) -> Result<(), AppError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        if admin_user::count(&mut conn).await? > 0 {
            return Ok(());
        }

        let Some(password) = &self.config.admin_password else {
            tracing::warn!(
                "No admin account exists and ADMIN_PASSWORD is not set; \
                 admin routes will be unusable until one is created"
            );
            return Ok(());
        };

        let hash = AdminUser::hash_password(password)
            .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;

        let id = admin_user::insert(
            &mut conn,
            &self.config.admin_username,
            &self.config.admin_username,
            &hash,
        )
        .await?;

        tracing::info!(id = %id, username = %self.config.admin_username, "Seeded admin account");
        Ok(())
    }
}
