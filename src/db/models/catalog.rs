//! Technology / Offering Catalogs
//!
//! Flat name catalogs referenced by projects and services through join
//! tables. Deletion is blocked while any join row points at an entry.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Technology catalog entry (`service_tech` table)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServiceTech {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Offering catalog entry (`service_offering` table)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServiceOffering {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create payload shared by both catalogs
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CatalogCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}
