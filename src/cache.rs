//! Resolved profile cache
//!
//! Resolution is a pure function of the filesystem snapshot, so callers that
//! resolve the same profile repeatedly can keep the result. Entries live until
//! invalidated; failed resolutions are never cached.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::ResolveError;
use crate::resolve::{EffectiveProfile, ProfileResolver};

/// Cache of effective profiles keyed by profile name
#[derive(Debug)]
pub struct ProfileCache {
    resolver: ProfileResolver,
    profiles: RwLock<HashMap<String, Arc<EffectiveProfile>>>,
}

impl ProfileCache {
    pub fn new(resolver: ProfileResolver) -> Self {
        Self {
            resolver,
            profiles: RwLock::new(HashMap::new()),
        }
    }

    pub fn resolver(&self) -> &ProfileResolver {
        &self.resolver
    }

    /// Cached profile, resolving it on first use
    pub fn get(&self, name: &str) -> Result<Arc<EffectiveProfile>, ResolveError> {
        if let Some(profile) = self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ok(Arc::clone(profile));
        }

        let resolved = Arc::new(self.resolver.resolve(name)?);
        let mut profiles = self.profiles.write().unwrap_or_else(PoisonError::into_inner);
        let entry = profiles
            .entry(name.to_string())
            .or_insert_with(|| Arc::clone(&resolved));

        tracing::debug!("Cached profile '{}' ({})", name, entry.fingerprint);
        Ok(Arc::clone(entry))
    }

    /// Drop one cached profile. Returns whether it was present.
    pub fn invalidate(&self, name: &str) -> bool {
        self.profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some()
    }

    /// Drop every cached profile
    pub fn clear(&self) {
        self.profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
