//! Resource resolution and rendering.
//!
//! Maps a parsed address to document content. Multi-document addresses
//! render each match as a labeled block joined by a fixed separator; the
//! single-file address returns raw content unmodified.

use crate::org::{KnowledgeIndex, OrgDocument, ResourceAddress, filter_by_category, filter_by_tag};
use crate::{Error, Result};

/// Separator between rendered document blocks.
const BLOCK_SEPARATOR: &str = "\n\n----------------------------------------\n\n";

/// Resolves an address against a document batch into rendered text.
///
/// Resolution is pure over the batch: the same address and an unchanged
/// batch yield byte-identical output.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when a well-formed address selects zero
/// documents. `all` never fails; an empty batch renders to empty text.
pub fn resolve(address: &ResourceAddress, documents: &[OrgDocument]) -> Result<String> {
    match address {
        ResourceAddress::All => Ok(render_documents(
            &documents.iter().collect::<Vec<_>>(),
        )),
        ResourceAddress::File(name) => {
            // Duplicate basenames resolve to the first match in batch order.
            documents
                .iter()
                .find(|doc| doc.metadata.file_name == *name)
                .map(|doc| doc.content.clone())
                .ok_or_else(|| Error::NotFound(format!("no org file named '{name}'")))
        },
        ResourceAddress::Category(category) => {
            let matched = filter_by_category(documents, category);
            if matched.is_empty() {
                return Err(not_found_category(category, None, documents));
            }
            Ok(render_documents(&matched))
        },
        ResourceAddress::CategoryTag { category, tag } => {
            let matched = filter_by_tag(&filter_by_category(documents, category), tag);
            if matched.is_empty() {
                return Err(not_found_category(category, Some(tag), documents));
            }
            Ok(render_documents(&matched))
        },
    }
}

/// Renders documents as labeled blocks joined by the fixed separator.
fn render_documents(documents: &[&OrgDocument]) -> String {
    let blocks: Vec<String> = documents
        .iter()
        .map(|doc| {
            format!(
                "# File: {}\n# Path: {}\n\n{}",
                doc.metadata.file_name,
                doc.metadata.file_path.display(),
                doc.content
            )
        })
        .collect();

    blocks.join(BLOCK_SEPARATOR)
}

/// Builds a `NotFound` error naming the categories that do exist.
fn not_found_category(
    category: &str,
    tag: Option<&str>,
    documents: &[OrgDocument],
) -> Error {
    let index = KnowledgeIndex::build(documents);
    let available: Vec<&str> = index.categories().collect();
    let available = if available.is_empty() {
        "none".to_string()
    } else {
        available.join(", ")
    };

    let what = tag.map_or_else(
        || format!("category '{category}'"),
        |tag| format!("category '{category}' with filetag '{tag}'"),
    );
    Error::NotFound(format!("{what} (available categories: {available})"))
}
