//! Serde helpers for the loosely-typed fields the API returns.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string where the server sends `""` for "unset".
///
/// Both `null` and blank strings become `None`.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

/// Deserialize `null` as the type's default value.
///
/// JSON fields backed by nullable columns (lists, maps) come back as `null`
/// on older records.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Links {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        demo: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        features: Vec<String>,
    }

    #[test]
    fn test_empty_string_is_none() {
        let links: Links = serde_json::from_str(r#"{"demo": "", "features": null}"#).unwrap();
        assert!(links.demo.is_none());
        assert!(links.features.is_empty());
    }

    #[test]
    fn test_present_values_kept() {
        let links: Links =
            serde_json::from_str(r#"{"demo": "https://demo.example", "features": ["a"]}"#)
                .unwrap();
        assert_eq!(links.demo.as_deref(), Some("https://demo.example"));
        assert_eq!(links.features, vec!["a".to_owned()]);
    }

    #[test]
    fn test_missing_fields_default() {
        let links: Links = serde_json::from_str("{}").unwrap();
        assert!(links.demo.is_none());
        assert!(links.features.is_empty());
    }

    #[test]
    fn test_truncate_char_boundary() {
        assert_eq!(truncate("héllo", 2), "h");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
