//! Serde helpers for partial-update payloads
//!
//! Update DTOs must distinguish "field absent" (leave unchanged) from
//! "field explicitly null" (clear the stored value). Nullable columns use
//! `Option<Option<T>>` with [`double_option`]: the outer `Option` tracks
//! presence, the inner one carries the null.

use serde::{Deserialize, Deserializer};

/// Deserialize into `Some(inner)` so that an absent field (via
/// `#[serde(default)]`) stays `None` while `"field": null` becomes
/// `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "double_option")]
        photo_url: Option<Option<String>>,
    }

    #[test]
    fn test_absent_field_is_none() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert!(p.photo_url.is_none());
    }

    #[test]
    fn test_null_field_is_some_none() {
        let p: Payload = serde_json::from_str(r#"{"photo_url": null}"#).unwrap();
        assert_eq!(p.photo_url, Some(None));
    }

    #[test]
    fn test_value_field_is_some_some() {
        let p: Payload = serde_json::from_str(r#"{"photo_url": "x.jpg"}"#).unwrap();
        assert_eq!(p.photo_url, Some(Some("x.jpg".to_string())));
    }
}
