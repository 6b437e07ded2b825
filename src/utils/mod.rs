//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error type and result alias
//! - [`validation`] - text length limits and validators
//! - [`time`] - epoch-ms timestamps and snowflake IDs
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResponse, ok};
pub use result::AppResult;
pub use time::{now_millis, now_secs, snowflake_id};
