//! Service Model
//!
//! A service offered on the public site. Shares the discount/pricing
//! rules with trainings and maps to the technology and offering catalogs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers::double_option;
use crate::pricing::DiscountKind;

/// Service row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Service {
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

/// Create service payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServiceCreate {
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
    pub tech_ids: Vec<i64>,
    #[serde(default)]
    pub offering_ids: Vec<i64>,
}

/// Partial update payload. `tech_ids` and `offering_ids`, when present,
/// replace the whole stored association sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub base_price: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub discount_value: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub discount_kind: Option<Option<DiscountKind>>,
    pub tech_ids: Option<Vec<i64>>,
    pub offering_ids: Option<Vec<i64>>,
}

/// Service response with catalog names and the derived price
#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub photo_url: String,
    pub techs: Vec<String>,
    pub offerings: Vec<String>,
    pub base_price: f64,
    pub discount_value: Option<f64>,
    pub discount_kind: Option<DiscountKind>,
    pub effective_price: f64,
    pub created_at: i64,
    pub updated_at: i64,
}
