//! Knowledge-base index.
//!
//! Derives the set of distinct categories and per-category tags from a
//! document batch. Built once per request and read-only thereafter; all
//! queries are pure views over the immutable batch.

use crate::org::OrgDocument;
use std::collections::{BTreeMap, BTreeSet};

/// Derived category/tag index over one document batch.
///
/// Categories and tags compare case-sensitively, exactly as written in the
/// headers (after the header-value trim). Listing order is always
/// lexicographic ascending, so identical input yields identical output.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeIndex {
    /// Distinct categories, lexicographically ordered.
    categories: BTreeSet<String>,
    /// Distinct tags per category, lexicographically ordered.
    tags_by_category: BTreeMap<String, BTreeSet<String>>,
}

impl KnowledgeIndex {
    /// Builds the index from a document batch.
    #[must_use]
    pub fn build(documents: &[OrgDocument]) -> Self {
        let mut categories = BTreeSet::new();
        let mut tags_by_category: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for doc in documents {
            // Documents without a category never participate in
            // category-based aggregation or addressing.
            let Some(category) = &doc.metadata.category else {
                continue;
            };

            categories.insert(category.clone());
            let tags = tags_by_category.entry(category.clone()).or_default();
            for tag in &doc.metadata.file_tags {
                tags.insert(tag.clone());
            }
        }

        Self {
            categories,
            tags_by_category,
        }
    }

    /// Returns the distinct categories, lexicographically sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    /// Returns the distinct tags among documents of `category`,
    /// lexicographically sorted. Unknown categories yield nothing.
    pub fn tags_for(&self, category: &str) -> impl Iterator<Item = &str> {
        self.tags_by_category
            .get(category)
            .into_iter()
            .flat_map(|tags| tags.iter().map(String::as_str))
    }
}

/// Returns the stable subsequence of `documents` whose category equals
/// `category` exactly.
#[must_use]
pub fn filter_by_category<'a>(
    documents: &'a [OrgDocument],
    category: &str,
) -> Vec<&'a OrgDocument> {
    documents
        .iter()
        .filter(|doc| doc.metadata.category.as_deref() == Some(category))
        .collect()
}

/// Returns the stable subsequence of `documents` whose filetags contain
/// `tag` exactly.
#[must_use]
pub fn filter_by_tag<'a>(documents: &[&'a OrgDocument], tag: &str) -> Vec<&'a OrgDocument> {
    documents
        .iter()
        .filter(|doc| doc.metadata.file_tags.iter().any(|t| t == tag))
        .copied()
        .collect()
}
