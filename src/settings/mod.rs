//! Resolver settings
//!
//! The explicit configuration object handed to the resolver. Nothing is read
//! from process-wide state: resolution is a function of the settings, the
//! requested profile name and the filesystem.
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! profiles_root = "~/agent-os/profiles"
//! max_inheritance_depth = 8
//! ```

mod defaults;

pub use defaults::{
    CONFIG_FILE, DOCUMENT_EXTENSION, MAX_INHERITANCE_DEPTH, MAX_INHERITANCE_DEPTH_CEILING,
    STANDARDS_DIR,
};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where profiles live and how they are laid out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverSettings {
    /// Directory containing one subdirectory per profile
    pub profiles_root: PathBuf,

    /// Per-profile configuration file name
    #[serde(default = "defaults::config_file")]
    pub config_file: String,

    /// Per-profile directory holding category subdirectories
    #[serde(default = "defaults::standards_dir")]
    pub standards_dir: String,

    /// Extension of standards documents, without the dot
    #[serde(default = "defaults::document_extension")]
    pub document_extension: String,

    /// Maximum number of profiles in one inheritance chain
    #[serde(default = "defaults::max_inheritance_depth")]
    pub max_inheritance_depth: usize,
}

/// Errors that can occur when loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ResolverSettings {
    /// Settings with defaults for everything but the profiles root
    pub fn new(profiles_root: impl Into<PathBuf>) -> Self {
        Self {
            profiles_root: profiles_root.into(),
            config_file: defaults::config_file(),
            standards_dir: defaults::standards_dir(),
            document_extension: defaults::document_extension(),
            max_inheritance_depth: defaults::max_inheritance_depth(),
        }
    }

    /// Set the inheritance depth limit
    pub fn with_max_inheritance_depth(mut self, depth: usize) -> Self {
        self.max_inheritance_depth = depth;
        self
    }

    /// Load settings from a TOML file.
    ///
    /// A relative `profiles_root` is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let mut settings = Self::parse(&content)?;

        if settings.profiles_root.is_relative() {
            if let Some(base) = path.parent() {
                settings.profiles_root = base.join(&settings.profiles_root);
            }
        }
        Ok(settings)
    }

    /// Parse settings from a TOML string
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        let mut settings: ResolverSettings = toml::from_str(content)?;
        settings.profiles_root = expand_home(&settings.profiles_root);
        settings.validate()?;
        Ok(settings)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.profiles_root.as_os_str().is_empty() {
            return Err(invalid("profiles_root", "path cannot be empty"));
        }

        for (field, value) in [
            ("config_file", &self.config_file),
            ("standards_dir", &self.standards_dir),
        ] {
            if value.is_empty() || value == "." || value == ".." {
                return Err(invalid(field, "must be a file or directory name"));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(invalid(field, "must not contain path separators"));
            }
        }

        if self.document_extension.is_empty() {
            return Err(invalid("document_extension", "extension cannot be empty"));
        }
        if self.document_extension.starts_with('.') {
            return Err(invalid(
                "document_extension",
                "extension must not start with a dot",
            ));
        }

        if self.max_inheritance_depth == 0
            || self.max_inheritance_depth > MAX_INHERITANCE_DEPTH_CEILING
        {
            return Err(invalid(
                "max_inheritance_depth",
                &format!("must be in [1, {}]", MAX_INHERITANCE_DEPTH_CEILING),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Resolve a leading `~/` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}
