//! Inheritance merge
//!
//! Profiles are folded root-first. For each profile:
//! - inherited keys matched by its exclusions are removed
//! - its own documents are overlaid (child wins on a shared key)
//!
//! Exclusions only ever apply to what was inherited, so a profile may both
//! exclude and redefine the same key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use profile_config::StandardKey;

use crate::store::{Document, Profile};

/// Effective document mapping
pub type DocumentMap = BTreeMap<StandardKey, Arc<Document>>;

/// Non-fatal observations made while merging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A profile's own document replaced an inherited one with the same key
    ConflictWarning {
        key: StandardKey,
        overridden: String,
        by: String,
    },

    /// An exclusion rule matched no inherited document
    UnusedExclusion { profile: String, entry: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ConflictWarning {
                key,
                overridden,
                by,
            } => write!(f, "{} from '{}' overridden by '{}'", key, overridden, by),
            Diagnostic::UnusedExclusion { profile, entry } => {
                write!(f, "exclusion '{}' in '{}' matched nothing", entry, profile)
            }
        }
    }
}

/// Merge one profile onto the inherited mapping.
pub fn merge_profile(inherited: DocumentMap, profile: &Profile) -> (DocumentMap, Vec<Diagnostic>) {
    let mut documents = inherited;
    let mut diagnostics = Vec::new();

    if !profile.exclusions.is_empty() {
        let mut used = vec![false; profile.exclusions.len()];

        documents.retain(|key, doc| {
            let hits = profile.exclusions.matching_rules(key);
            for &index in &hits {
                used[index] = true;
            }
            if !hits.is_empty() {
                tracing::debug!(
                    "Profile '{}' excludes {} inherited from '{}'",
                    profile.name,
                    key,
                    doc.profile
                );
            }
            hits.is_empty()
        });

        for (entry, _) in profile
            .exclusions
            .entries()
            .iter()
            .zip(&used)
            .filter(|(_, used)| !**used)
        {
            tracing::warn!(
                "Exclusion '{}' in profile '{}' matched no inherited standard",
                entry,
                profile.name
            );
            diagnostics.push(Diagnostic::UnusedExclusion {
                profile: profile.name.clone(),
                entry: entry.clone(),
            });
        }
    }

    for doc in &profile.documents {
        if let Some(previous) = documents.insert(doc.key.clone(), Arc::clone(doc)) {
            tracing::info!(
                "Standard {} from '{}' overridden by '{}'",
                doc.key,
                previous.profile,
                profile.name
            );
            diagnostics.push(Diagnostic::ConflictWarning {
                key: doc.key.clone(),
                overridden: previous.profile.clone(),
                by: profile.name.clone(),
            });
        }
    }

    (documents, diagnostics)
}

/// Merge a chain of profiles, first is the root ancestor, last has highest
/// precedence.
pub fn merge_chain(chain: &[Profile]) -> (DocumentMap, Vec<Diagnostic>) {
    chain.iter().fold(
        (DocumentMap::new(), Vec::new()),
        |(documents, mut diagnostics), profile| {
            let (merged, mut found) = merge_profile(documents, profile);
            diagnostics.append(&mut found);
            (merged, diagnostics)
        },
    )
}
