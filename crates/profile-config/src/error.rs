//! Profile configuration errors.

/// Errors raised while reading or validating a `profile-config.yml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read profile config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse profile config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    #[error("Invalid profile name '{name}': {reason}")]
    InvalidProfileName { name: String, reason: String },

    #[error("Invalid excluded standard '{entry}': {reason}")]
    InvalidExclusion { entry: String, reason: String },

    #[error("Glob pattern error: {0}")]
    Glob(#[from] globset::Error),
}
