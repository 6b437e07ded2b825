//! Mentor Model
//!
//! Mentors are stored separately because they can appear in multiple
//! trainings. Names are normalized to trimmed lowercase at write time and
//! kept unique by the repository's pre-insert check.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers::double_option;

/// Mentor entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Mentor {
    pub id: i64,
    /// Normalized (trimmed lowercase) name
    pub name: String,
    pub photo_url: Option<String>,
    /// E.g. "Python", "Frontend", "Fullstack"
    pub specialization: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create mentor payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MentorCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub photo_url: Option<String>,
    pub specialization: Option<String>,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MentorUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub photo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub specialization: Option<Option<String>>,
}

/// Normalize a mentor name for storage and uniqueness comparison
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
