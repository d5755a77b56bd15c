//! Standards documents and the profiles that own them

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::sync::Arc;

use profile_config::{ExclusionList, ProfileConfig, StandardKey};

/// One markdown standard, as loaded from its owning profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Profile the document was loaded from
    pub profile: String,

    /// Category and file name
    pub key: StandardKey,

    /// Raw markdown text
    pub content: String,

    /// SHA-256 of the raw bytes
    pub sha256: String,

    /// Source file
    pub path: PathBuf,
}

impl Document {
    pub fn new(
        profile: impl Into<String>,
        key: StandardKey,
        content: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        let content = content.into();
        let sha256 = hex::encode(Sha256::digest(content.as_bytes()));
        Self {
            profile: profile.into(),
            key,
            content,
            sha256,
            path: path.into(),
        }
    }

    pub fn category(&self) -> &str {
        &self.key.category
    }

    pub fn filename(&self) -> &str {
        &self.key.filename
    }
}

/// A profile as declared on disk, before inheritance is applied
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,

    /// Profile directory
    pub root: PathBuf,

    pub config: ProfileConfig,

    /// Compiled `excluded_standards`
    pub exclusions: ExclusionList,

    /// SHA-256 of the raw config file, when one exists
    pub config_digest: Option<String>,

    /// Documents declared directly by this profile, sorted by key
    pub documents: Vec<Arc<Document>>,
}

impl Profile {
    pub fn parent(&self) -> Option<&str> {
        self.config.parent.as_deref()
    }
}
