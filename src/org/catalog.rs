//! Resource catalog builder.
//!
//! Enumerates every addressable resource for discovery: the whole corpus,
//! one entry per file, one per category, and one per category×tag pair.

use crate::org::{
    KnowledgeIndex, OrgDocument, ResourceAddress, filter_by_category, filter_by_tag,
};

/// A discoverable resource: an address plus display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// The address the entry resolves through.
    pub address: ResourceAddress,
    /// Human-facing name.
    pub display_name: String,
    /// Human-facing description.
    pub description: String,
}

/// Builds the catalog of addressable resources for a document batch.
///
/// Enumeration order: the `all` entry, documents in batch order, then
/// categories lexicographically with each category's tag pairs nested
/// directly after it. Tag pairs are drawn from the index (deduplicated,
/// sorted), not from raw per-file tag sequences.
#[must_use]
pub fn build_catalog(documents: &[OrgDocument]) -> Vec<CatalogEntry> {
    let index = KnowledgeIndex::build(documents);
    let mut entries = Vec::new();

    entries.push(CatalogEntry {
        address: ResourceAddress::All,
        display_name: "All org files".to_string(),
        description: "Aggregated content of every configured org file".to_string(),
    });

    for doc in documents {
        let display_name = doc
            .metadata
            .title
            .clone()
            .unwrap_or_else(|| doc.metadata.file_name.clone());
        entries.push(CatalogEntry {
            address: ResourceAddress::File(doc.metadata.file_name.clone()),
            display_name,
            description: format!("Org file at {}", doc.metadata.file_path.display()),
        });
    }

    for category in index.categories() {
        let in_category = filter_by_category(documents, category);
        entries.push(CatalogEntry {
            address: ResourceAddress::Category(category.to_string()),
            display_name: format!("Category: {category}"),
            description: format!(
                "{} in category '{category}'",
                count_files(in_category.len())
            ),
        });

        for tag in index.tags_for(category) {
            let tagged = filter_by_tag(&in_category, tag);
            entries.push(CatalogEntry {
                address: ResourceAddress::CategoryTag {
                    category: category.to_string(),
                    tag: tag.to_string(),
                },
                display_name: format!("Category: {category}, tag: {tag}"),
                description: format!(
                    "{} tagged ':{tag}:' in category '{category}'",
                    count_files(tagged.len())
                ),
            });
        }
    }

    entries
}

/// Formats a document count with singular/plural wording.
fn count_files(count: usize) -> String {
    if count == 1 {
        "1 org file".to_string()
    } else {
        format!("{count} org files")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::org::OrgMetadata;
    use std::path::PathBuf;

    fn doc(name: &str, category: Option<&str>, title: Option<&str>, tags: &[&str]) -> OrgDocument {
        OrgDocument {
            metadata: OrgMetadata {
                file_path: PathBuf::from(format!("/org/{name}")),
                file_name: name.to_string(),
                category: category.map(ToString::to_string),
                title: title.map(ToString::to_string),
                file_tags: tags.iter().map(ToString::to_string).collect(),
            },
            content: String::new(),
        }
    }

    #[test]
    fn test_two_file_scenario_addresses() {
        let docs = vec![
            doc("work.org", Some("work"), None, &["urgent"]),
            doc("life.org", Some("life"), None, &[]),
        ];

        let entries = build_catalog(&docs);
        let addresses: Vec<String> = entries.iter().map(|e| e.address.to_string()).collect();

        assert_eq!(
            addresses,
            vec![
                "all",
                "file/work.org",
                "file/life.org",
                "category/life",
                "category/work",
                "category/work/filetag/urgent",
            ]
        );
        // life has no tags, so no category/life/filetag/* entry exists.
        assert!(!addresses.iter().any(|a| a.starts_with("category/life/")));
    }

    #[test]
    fn test_file_display_name_prefers_title() {
        let docs = vec![
            doc("work.org", None, Some("My Work Projects"), &[]),
            doc("notes.org", None, None, &[]),
        ];

        let entries = build_catalog(&docs);
        assert_eq!(entries[1].display_name, "My Work Projects");
        assert_eq!(entries[2].display_name, "notes.org");
    }

    #[test]
    fn test_category_counts_singular_plural() {
        let docs = vec![
            doc("a.org", Some("work"), None, &[]),
            doc("b.org", Some("work"), None, &[]),
            doc("c.org", Some("life"), None, &[]),
        ];

        let entries = build_catalog(&docs);
        let life = entries
            .iter()
            .find(|e| e.address == ResourceAddress::Category("life".to_string()))
            .unwrap();
        assert_eq!(life.description, "1 org file in category 'life'");

        let work = entries
            .iter()
            .find(|e| e.address == ResourceAddress::Category("work".to_string()))
            .unwrap();
        assert_eq!(work.description, "2 org files in category 'work'");
    }

    #[test]
    fn test_tag_entries_use_index_tags_with_counts() {
        let docs = vec![
            doc("a.org", Some("work"), None, &["urgent", "urgent", "client"]),
            doc("b.org", Some("work"), None, &["urgent"]),
        ];

        let entries = build_catalog(&docs);
        let tag_addresses: Vec<String> = entries
            .iter()
            .filter(|e| matches!(e.address, ResourceAddress::CategoryTag { .. }))
            .map(|e| e.address.to_string())
            .collect();

        // Deduplicated and lexicographically ordered despite raw duplicates.
        assert_eq!(
            tag_addresses,
            vec![
                "category/work/filetag/client",
                "category/work/filetag/urgent",
            ]
        );

        let urgent = entries
            .iter()
            .find(|e| e.address.to_string() == "category/work/filetag/urgent")
            .unwrap();
        assert_eq!(
            urgent.description,
            "2 org files tagged ':urgent:' in category 'work'"
        );
    }

    #[test]
    fn test_empty_batch_still_lists_all() {
        let entries = build_catalog(&[]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].address, ResourceAddress::All);
    }
}
