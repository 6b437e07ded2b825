//! Member Model

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::Validate;

use super::serde_helpers::double_option;

/// Member role on the public site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum MemberRole {
    Team,
    Intern,
}

/// Structured social links, stored as a JSON text column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

/// Member entity (team member or intern)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub photo_url: Option<String>,
    pub position: String,
    /// ISO-8601 date (YYYY-MM-DD)
    pub start_date: String,
    pub end_date: Option<String>,
    pub social_media: Option<Json<SocialMedia>>,
    pub contact_email: String,
    pub personal_email: Option<String>,
    pub contact_number: Option<String>,
    pub is_visible: bool,
    pub role: MemberRole,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create member payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MemberCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub photo_url: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub position: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub social_media: Option<SocialMedia>,
    #[validate(email)]
    pub contact_email: String,
    #[validate(email)]
    pub personal_email: Option<String>,
    pub contact_number: Option<String>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    pub role: MemberRole,
}

fn default_visible() -> bool {
    true
}

/// Partial update payload. Nullable fields use double options so an
/// explicit `null` clears the stored value while absence leaves it alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub photo_url: Option<Option<String>>,
    pub position: Option<String>,
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub social_media: Option<Option<SocialMedia>>,
    pub contact_email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub personal_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub contact_number: Option<Option<String>>,
    pub is_visible: Option<bool>,
    pub role: Option<MemberRole>,
}
