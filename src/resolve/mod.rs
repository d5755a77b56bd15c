//! Profile resolution
//!
//! Walks a profile's inheritance chain up to its root ancestor, then merges
//! the chain root-first:
//! 1. Root profile's own documents
//! 2. Each descendant: drop excluded inherited keys, overlay own documents
//! 3. Requested profile last (highest precedence)

mod effective;
mod merge;

pub use effective::{EffectiveProfile, ProfileSource, SCHEMA_ID, SCHEMA_VERSION};
pub use merge::{merge_chain, merge_profile, Diagnostic, DocumentMap};

use std::collections::HashSet;

use crate::error::ResolveError;
use crate::settings::{ResolverSettings, SettingsError};
use crate::store::{DocumentStore, Profile};

/// Resolves named profiles into effective standards sets
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    store: DocumentStore,
}

impl ProfileResolver {
    /// Resolver over validated settings
    pub fn new(settings: ResolverSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            store: DocumentStore::new(settings)?,
        })
    }

    pub fn settings(&self) -> &ResolverSettings {
        self.store.settings()
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Resolve a profile against its ancestors.
    pub fn resolve(&self, name: &str) -> Result<EffectiveProfile, ResolveError> {
        let chain = self.load_chain(name)?;
        let (documents, diagnostics) = merge_chain(&chain);
        let effective = EffectiveProfile::build(&chain, documents, diagnostics)?;

        tracing::info!(
            "Resolved profile '{}' ({} documents, chain: {})",
            name,
            effective.len(),
            effective.chain().join(" -> ")
        );

        Ok(effective)
    }

    /// Load the requested profile and every ancestor, root ancestor first.
    pub fn load_chain(&self, name: &str) -> Result<Vec<Profile>, ResolveError> {
        let limit = self.settings().max_inheritance_depth;
        let mut chain: Vec<Profile> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut next = Some(name.to_string());

        while let Some(current) = next.take() {
            if !visited.insert(current.clone()) {
                let mut names: Vec<String> = chain.iter().map(|p| p.name.clone()).collect();
                names.push(current);
                return Err(ResolveError::CyclicInheritance { chain: names });
            }

            if chain.len() >= limit {
                return Err(ResolveError::InheritanceTooDeep {
                    profile: name.to_string(),
                    limit,
                });
            }

            let declared_by = chain.last().map(|p| p.name.clone());
            let profile = match (self.store.load_profile(&current), declared_by) {
                (Err(e), Some(child)) if e.is_not_found() => {
                    return Err(ResolveError::MissingParent {
                        profile: child,
                        parent: current,
                    });
                }
                (result, _) => result?,
            };

            next = profile.parent().map(str::to_string);
            chain.push(profile);
        }

        chain.reverse();
        Ok(chain)
    }
}
