//! Training Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::mentor::Mentor;
use super::serde_helpers::double_option;
use crate::pricing::DiscountKind;

/// Training row. Benefits and mentor links live in child tables and are
/// loaded by the repository when building responses.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Training {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub photo_url: String,
    pub base_price: f64,
    pub discount_value: Option<f64>,
    pub discount_kind: Option<DiscountKind>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create training payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TrainingCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[serde(default)]
    pub photo_url: String,
    #[validate(range(min = 0.0))]
    pub base_price: f64,
    #[validate(range(min = 0.0))]
    pub discount_value: Option<f64>,
    pub discount_kind: Option<DiscountKind>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub mentor_ids: Vec<i64>,
}

/// Partial update payload. `benefits` and `mentor_ids`, when present,
/// replace the whole stored collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainingUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub base_price: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub discount_value: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub discount_kind: Option<Option<DiscountKind>>,
    pub benefits: Option<Vec<String>>,
    pub mentor_ids: Option<Vec<i64>>,
}

/// Training response with loaded relations and the derived price
#[derive(Debug, Clone, Serialize)]
pub struct TrainingResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub photo_url: String,
    pub base_price: f64,
    pub discount_value: Option<f64>,
    pub discount_kind: Option<DiscountKind>,
    /// Recomputed from the persisted row on every read
    pub effective_price: f64,
    pub benefits: Vec<String>,
    pub mentors: Vec<Mentor>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Paginated training listing
#[derive(Debug, Clone, Serialize)]
pub struct TrainingPage {
    pub items: Vec<TrainingResponse>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}
