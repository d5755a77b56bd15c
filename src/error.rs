//! Resolution errors

use std::io;
use std::path::PathBuf;

use profile_config::ConfigError;

/// Fatal errors raised while loading or resolving a profile.
///
/// Any of these aborts resolution of the requested profile; no partial
/// result is returned.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Profile '{name}' not found at {path}")]
    ProfileNotFound { name: String, path: PathBuf },

    #[error("Profile '{profile}' declares parent '{parent}', which does not exist")]
    MissingParent { profile: String, parent: String },

    #[error("Failed to read document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cyclic profile inheritance: {}", .chain.join(" -> "))]
    CyclicInheritance { chain: Vec<String> },

    #[error("Profile '{profile}' exceeds the inheritance depth limit of {limit}")]
    InheritanceTooDeep { profile: String, limit: usize },

    #[error("Invalid profile name: {0}")]
    InvalidProfileName(#[source] ConfigError),

    #[error("Invalid config for profile '{profile}': {source}")]
    Config {
        profile: String,
        #[source]
        source: ConfigError,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Fingerprint error: {0}")]
    Fingerprint(String),
}

impl ResolveError {
    /// True for every flavor of "named thing does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ResolveError::NotFound(_)
                | ResolveError::ProfileNotFound { .. }
                | ResolveError::MissingParent { .. }
        )
    }
}
