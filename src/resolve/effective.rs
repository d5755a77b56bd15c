//! Effective profile with full provenance
//!
//! The effective profile captures the merged standards plus where each one
//! came from. It contains no timestamps, so resolving the same profile over
//! an unchanged filesystem serializes to identical bytes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

use profile_config::StandardKey;

use super::merge::{Diagnostic, DocumentMap};
use crate::error::ResolveError;
use crate::index::CategoryIndex;
use crate::store::{Document, Profile};

/// Schema version for effective profiles
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "standards-profiles/effective_profile@1";

/// A profile that contributed to the effective set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSource {
    pub name: String,

    /// Profile directory
    pub path: String,

    /// SHA-256 of the raw config file (None when the profile has none)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_digest: Option<String>,
}

/// Fully merged standards for one profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveProfile {
    pub schema_version: u32,

    pub schema_id: String,

    /// Requested profile
    pub name: String,

    /// Contributing profiles, root ancestor first
    pub sources: Vec<ProfileSource>,

    /// Resolved documents keyed by `category/filename`
    pub documents: DocumentMap,

    /// Overrides and unused exclusions
    pub diagnostics: Vec<Diagnostic>,

    /// SHA-256 over the canonical (key, profile, digest) listing
    pub fingerprint: String,
}

#[derive(Serialize)]
struct FingerprintEntry<'a> {
    key: &'a StandardKey,
    profile: &'a str,
    sha256: &'a str,
}

impl EffectiveProfile {
    /// Build from a root-first chain and its merged documents
    pub(crate) fn build(
        chain: &[Profile],
        documents: DocumentMap,
        diagnostics: Vec<Diagnostic>,
    ) -> Result<Self, ResolveError> {
        let name = chain
            .last()
            .map(|p| p.name.clone())
            .unwrap_or_default();

        let sources = chain
            .iter()
            .map(|p| ProfileSource {
                name: p.name.clone(),
                path: p.root.to_string_lossy().to_string(),
                config_digest: p.config_digest.clone(),
            })
            .collect();

        let fingerprint = Self::compute_fingerprint(&documents)?;

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            name,
            sources,
            documents,
            diagnostics,
            fingerprint,
        })
    }

    /// SHA-256 hex digest of the RFC 8785 canonical JSON of the document
    /// listing. Paths are left out so relocated profile trees fingerprint
    /// identically.
    pub fn compute_fingerprint(documents: &DocumentMap) -> Result<String, ResolveError> {
        let entries: Vec<FingerprintEntry<'_>> = documents
            .iter()
            .map(|(key, doc)| FingerprintEntry {
                key,
                profile: &doc.profile,
                sha256: &doc.sha256,
            })
            .collect();

        let jcs_bytes = serde_json_canonicalizer::to_vec(&entries)
            .map_err(|e| ResolveError::Fingerprint(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&jcs_bytes);
        Ok(hex::encode(hasher.finalize()))
    }

    /// Profile names, root ancestor first
    pub fn chain(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name.as_str()).collect()
    }

    /// Look up a document by category and file name
    pub fn get(&self, category: &str, filename: &str) -> Option<&Document> {
        self.documents
            .get(&StandardKey::new(category, filename))
            .map(|d| d.as_ref())
    }

    pub fn contains(&self, key: &StandardKey) -> bool {
        self.documents.contains_key(key)
    }

    /// Documents in key order
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values().map(|d| d.as_ref())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Group documents by category
    pub fn by_category(&self) -> CategoryIndex<'_> {
        CategoryIndex::new(self)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("JSON serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)
    }
}
