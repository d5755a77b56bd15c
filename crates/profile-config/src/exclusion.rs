//! Exclusion rules for inherited standards
//!
//! A child profile lists the inherited standards it suppresses. Entries are
//! `category/filename` pairs, optionally prefixed with the standards
//! directory, and may use glob syntax (`testing/*`, `*/legacy-*.md`).
//!
//! Every entry always excludes its exact key, so file names that happen to
//! contain glob metacharacters (`[legacy]-ui.md`, `a{b.md`) are still
//! excluded verbatim.

use std::collections::HashSet;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::key::split_pair;
use crate::{ConfigError, StandardKey};

/// Compiled set of exclusion rules declared by one profile
#[derive(Debug, Clone)]
pub struct ExclusionList {
    entries: Vec<String>,
    keys: Vec<StandardKey>,
    literal: HashSet<StandardKey>,
    glob_set: GlobSet,
    /// Entry index of each glob in `glob_set`
    glob_entries: Vec<usize>,
}

impl Default for ExclusionList {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            keys: Vec::new(),
            literal: HashSet::new(),
            glob_set: GlobSet::empty(),
            glob_entries: Vec::new(),
        }
    }
}

impl ExclusionList {
    /// Compile exclusion entries.
    ///
    /// `standards_dir` is the optional leading segment that entries may carry
    /// (`standards/testing/ui-testing.md` and `testing/ui-testing.md` are the
    /// same rule). An entry that is not a valid glob is kept as a literal key.
    pub fn from_entries<I, S>(entries: I, standards_dir: &str) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut list = Self::default();

        for entry in entries {
            let key = normalize_entry(entry.as_ref(), standards_dir)?;
            let rule = key.to_string();

            if let Ok(glob) = GlobBuilder::new(&rule).literal_separator(true).build() {
                builder.add(glob);
                list.glob_entries.push(list.entries.len());
            }

            list.literal.insert(key.clone());
            list.keys.push(key);
            list.entries.push(rule);
        }

        list.glob_set = builder.build()?;
        Ok(list)
    }

    /// Normalized rules in declaration order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a document key is excluded
    pub fn is_excluded(&self, key: &StandardKey) -> bool {
        self.literal.contains(key) || self.glob_set.is_match(key.to_string())
    }

    /// Indices (into `entries()`) of every rule matching the key, ascending
    pub fn matching_rules(&self, key: &StandardKey) -> Vec<usize> {
        let mut hits: Vec<usize> = self
            .glob_set
            .matches(key.to_string())
            .into_iter()
            .map(|i| self.glob_entries[i])
            .collect();
        hits.extend(
            self.keys
                .iter()
                .enumerate()
                .filter(|(_, k)| *k == key)
                .map(|(i, _)| i),
        );
        hits.sort_unstable();
        hits.dedup();
        hits
    }
}

fn normalize_entry(raw: &str, standards_dir: &str) -> Result<StandardKey, ConfigError> {
    let mut entry = raw.trim();
    while let Some(rest) = entry.strip_prefix("./") {
        entry = rest;
    }

    let prefix = format!("{}/", standards_dir.trim_matches('/'));
    if let Some(rest) = entry.strip_prefix(prefix.as_str()) {
        entry = rest;
    }

    let (category, filename) = split_pair(entry).map_err(|e| match e {
        ConfigError::InvalidExclusion { reason, .. } => ConfigError::InvalidExclusion {
            entry: raw.to_string(),
            reason,
        },
        other => other,
    })?;

    Ok(StandardKey::new(category, filename))
}
