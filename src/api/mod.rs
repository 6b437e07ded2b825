//! API route modules
//!
//! One module per resource, each exposing a `router()`. Handlers taking a
//! [`crate::auth::CurrentUser`] parameter are admin-only; the rest are the
//! public-read surface of the site.
//!
//! Mutating handlers open one transaction per request via [`begin`], run
//! every repository call inside it, and [`commit`] once. An error on any
//! step drops the transaction and rolls the whole request back.

pub mod auth;
pub mod catalog;
pub mod health;
pub mod members;
pub mod mentors;
pub mod opportunities;
pub mod projects;
pub mod services;
pub mod trainings;
pub mod uploads;

use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::utils::AppError;

/// Checkout a read connection
pub(crate) async fn acquire(pool: &SqlitePool) -> Result<PoolConnection<Sqlite>, AppError> {
    pool.acquire()
        .await
        .map_err(|e| AppError::database(e.to_string()))
}

/// Open the request's transaction
pub(crate) async fn begin(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, AppError> {
    pool.begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))
}

/// Commit the request's transaction
pub(crate) async fn commit(tx: Transaction<'static, Sqlite>) -> Result<(), AppError> {
    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))
}

/// Run the payload's declared validations
pub(crate) fn validate(payload: &impl validator::Validate) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
