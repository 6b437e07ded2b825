//! Project Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Project row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub photo_url: String,
    pub project_link: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Client feedback attached to a project; removed with the project
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectFeedback {
    pub id: i64,
    pub client_name: String,
    pub client_photo: Option<String>,
    pub feedback_description: String,
    pub rating: f64,
}

/// Create project payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub project_link: String,
    #[serde(default)]
    pub tech_ids: Vec<i64>,
}

/// Partial update payload. `tech_ids`, when present, replaces the whole
/// technology association set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub project_link: Option<String>,
    pub tech_ids: Option<Vec<i64>>,
}

/// Create feedback payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectFeedbackCreate {
    #[validate(length(min = 1, max = 200))]
    pub client_name: String,
    pub client_photo: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub feedback_description: String,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
}

/// Project response with technology names and feedbacks loaded
#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub photo_url: String,
    pub techs: Vec<String>,
    pub project_link: String,
    pub feedbacks: Vec<ProjectFeedback>,
    pub created_at: i64,
    pub updated_at: i64,
}
