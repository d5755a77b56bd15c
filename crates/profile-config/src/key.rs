//! Standard document identity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::ConfigError;

/// Identity of a standards document: its category directory plus file name.
///
/// Serializes as the string `category/filename` so it can key JSON maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StandardKey {
    pub category: String,
    pub filename: String,
}

impl StandardKey {
    pub fn new(category: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            filename: filename.into(),
        }
    }

    /// Parse a `category/filename` pair.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let (category, filename) = split_pair(value)?;
        Ok(Self::new(category, filename))
    }
}

impl fmt::Display for StandardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.filename)
    }
}

impl Serialize for StandardKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StandardKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StandardKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Split `category/filename` into its two segments, rejecting anything that
/// could escape the standards directory.
pub(crate) fn split_pair(value: &str) -> Result<(&str, &str), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidExclusion {
        entry: value.to_string(),
        reason: reason.to_string(),
    };

    if value.is_empty() {
        return Err(invalid("empty entry"));
    }
    if value.starts_with('/') || value.contains('\\') {
        return Err(invalid("must be a relative path using '/' separators"));
    }

    let segments: Vec<&str> = value.split('/').collect();
    if segments.len() != 2 {
        return Err(invalid("expected exactly 'category/filename'"));
    }
    for segment in &segments {
        if segment.is_empty() || *segment == "." || *segment == ".." {
            return Err(invalid("path segments must be non-empty names"));
        }
    }

    Ok((segments[0], segments[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let key = StandardKey::parse("testing/ui-testing.md").unwrap();
        assert_eq!(key.category, "testing");
        assert_eq!(key.filename, "ui-testing.md");
        assert_eq!(key.to_string(), "testing/ui-testing.md");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(StandardKey::parse("").is_err());
        assert!(StandardKey::parse("testing").is_err());
        assert!(StandardKey::parse("a/b/c.md").is_err());
        assert!(StandardKey::parse("../secret.md").is_err());
        assert!(StandardKey::parse("/testing/x.md").is_err());
        assert!(StandardKey::parse("testing\\x.md").is_err());
    }

    #[test]
    fn test_serializes_as_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(StandardKey::new("global", "naming.md"), 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"global/naming.md":1}"#);

        let parsed: std::collections::BTreeMap<StandardKey, i32> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }

    #[test]
    fn test_ordering_is_category_then_filename() {
        let mut keys = vec![
            StandardKey::new("testing", "a.md"),
            StandardKey::new("backend", "z.md"),
            StandardKey::new("backend", "api.md"),
        ];
        keys.sort();
        assert_eq!(keys[0].to_string(), "backend/api.md");
        assert_eq!(keys[1].to_string(), "backend/z.md");
        assert_eq!(keys[2].to_string(), "testing/a.md");
    }
}
