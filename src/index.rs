//! Category index over an effective profile.
//!
//! Read-only view grouping resolved documents by category, ordered within a
//! category by file name (case-insensitive, ties broken by exact bytes).

use std::collections::BTreeMap;

use crate::resolve::EffectiveProfile;
use crate::store::Document;

/// Documents of an effective profile grouped by category
#[derive(Debug, Clone)]
pub struct CategoryIndex<'a> {
    categories: BTreeMap<&'a str, Vec<&'a Document>>,
}

impl<'a> CategoryIndex<'a> {
    pub fn new(profile: &'a EffectiveProfile) -> Self {
        Self {
            categories: by_category(profile),
        }
    }

    /// Category names in ascending order
    pub fn categories(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.categories.keys().copied()
    }

    /// Ordered documents of one category (empty when the category is unknown)
    pub fn documents(&self, category: &str) -> &[&'a Document] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Exact lookup by category and file name
    pub fn get(&self, category: &str, filename: &str) -> Option<&'a Document> {
        self.documents(category)
            .iter()
            .find(|d| d.filename() == filename)
            .copied()
    }

    /// Iterate categories with their ordered documents
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a Document])> + '_ {
        self.categories
            .iter()
            .map(|(category, docs)| (*category, docs.as_slice()))
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<&'a str, Vec<&'a Document>> {
        self.categories
    }
}

/// Group an effective profile's documents by category.
pub fn by_category(profile: &EffectiveProfile) -> BTreeMap<&str, Vec<&Document>> {
    let mut categories: BTreeMap<&str, Vec<&Document>> = BTreeMap::new();
    for doc in profile.documents() {
        categories.entry(doc.category()).or_default().push(doc);
    }

    for docs in categories.values_mut() {
        docs.sort_by(|a, b| {
            a.filename()
                .to_lowercase()
                .cmp(&b.filename().to_lowercase())
                .then_with(|| a.filename().cmp(b.filename()))
        });
    }
    categories
}
