//! Org knowledge-base core.
//!
//! Everything between raw file content and rendered resource text lives
//! here: header metadata extraction, concurrent batch loading, the derived
//! category/tag index, the address grammar, resolution, and the resource
//! catalog. All derived structures are rebuilt per request from the
//! configured path list; nothing is cached across requests.

mod address;
mod catalog;
mod document;
mod index;
mod loader;
mod metadata;
mod resolver;

pub use address::{ResourceAddress, SCHEME};
pub use catalog::{CatalogEntry, build_catalog};
pub use document::{OrgDocument, OrgMetadata};
pub use index::{KnowledgeIndex, filter_by_category, filter_by_tag};
pub use loader::{load_document, load_documents};
pub use metadata::extract_metadata;
pub use resolver::resolve;
