//! Authentication
//!
//! JWT-based admin authentication:
//! - [`jwt`] - token service and claims
//! - [`extractor`] - axum extractor gating admin-only routes

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
