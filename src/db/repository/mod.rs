//! Repository Module
//!
//! CRUD operations over the SQLite store. Functions take a
//! `&mut SqliteConnection` so callers control the transaction boundary:
//! handlers open one transaction per mutating request, pass it through
//! every repository call, and commit once. Dropping the transaction on an
//! error path rolls the whole request back.

pub mod admin_user;
pub mod catalog;
pub mod member;
pub mod mentor;
pub mod opportunity;
pub mod project;
pub mod service;
pub mod training;

use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Referential-guard refusal; the message enumerates the blocking rows
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Conflict(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
