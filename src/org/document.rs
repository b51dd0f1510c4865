//! Document data model.
//!
//! A document is one org file's extracted header metadata plus its full raw
//! content. Both are immutable once produced; derived structures only ever
//! borrow from the batch that owns them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Header metadata extracted from a single org file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgMetadata {
    /// Absolute path of the source file, unique within a batch.
    pub file_path: PathBuf,
    /// Last path segment, used for `file/<name>` addressing.
    ///
    /// Not guaranteed unique across directories; `file/<name>` resolution
    /// takes the first match in batch order.
    pub file_name: String,
    /// Value of the first `#+CATEGORY:` header, if any.
    pub category: Option<String>,
    /// Value of the first `#+TITLE:` header, if any. Display only.
    pub title: Option<String>,
    /// Tags accumulated from `#+FILETAGS:` headers, in file order.
    ///
    /// Raw duplicates are preserved here; deduplication happens at the
    /// index aggregation step.
    pub file_tags: Vec<String>,
}

/// One org file: extracted metadata plus the full raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgDocument {
    /// Extracted header metadata.
    pub metadata: OrgMetadata,
    /// The complete, unmodified file content.
    pub content: String,
}
