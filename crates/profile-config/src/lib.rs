//! Typed schema for standards profile configuration.
//!
//! Each profile directory may carry a `profile-config.yml` declaring the
//! profile it inherits from and the inherited standards it suppresses:
//!
//! ```yaml
//! parent: default
//! excluded_standards:
//!   - standards/testing/ui-testing.md
//!   - standards/backend/*
//! ```
//!
//! Parsing is strict: unknown keys and malformed entries are rejected.

mod error;
mod exclusion;
mod key;

pub use error::ConfigError;
pub use exclusion::ExclusionList;
pub use key::StandardKey;

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Default file name of a profile's configuration.
pub const CONFIG_FILE_NAME: &str = "profile-config.yml";

/// Default name of the directory holding a profile's standards.
pub const STANDARDS_DIR: &str = "standards";

/// Parsed `profile-config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// Profile this one inherits from.
    #[serde(default, alias = "inherits_from", skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Inherited standards to suppress, as `category/filename` rules.
    #[serde(
        default,
        alias = "exclude_inherited_files",
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub excluded_standards: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProfileConfig {
    /// Load from a path. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse YAML content and validate the parent name.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if is_blank_document(content) {
            return Ok(Self::default());
        }

        let config: ProfileConfig = serde_yaml_ng::from_str(content)?;
        if let Some(parent) = &config.parent {
            validate_profile_name(parent)?;
        }
        Ok(config)
    }

    /// Compile the exclusion rules.
    pub fn exclusions(&self, standards_dir: &str) -> Result<ExclusionList, ConfigError> {
        ExclusionList::from_entries(&self.excluded_standards, standards_dir)
    }
}

/// A profile name must be a single, non-empty path component.
pub fn validate_profile_name(name: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidProfileName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name != name.trim() {
        return Err(invalid("name has surrounding whitespace"));
    }
    if name == "." || name == ".." {
        return Err(invalid("name is a relative path marker"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name contains a path separator"));
    }
    Ok(())
}

fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}
