//! # Orgmcp
//!
//! An MCP server exposing a personal org-mode knowledge base.
//!
//! Orgmcp reads a configured set of org files, derives a category/tag index
//! from their headers, and serves the documents over the Model Context
//! Protocol as addressable resources and prompt templates.
//!
//! ## Features
//!
//! - Header metadata extraction (`#+CATEGORY:`, `#+TITLE:`, `#+FILETAGS:`)
//! - Derived category and filetag index, rebuilt fresh on every request
//! - Hierarchical `org://` resource addressing with multi-file aggregation
//! - Prompt templates that embed category resources for review workflows
//!
//! ## Example
//!
//! ```rust,ignore
//! use orgmcp::org::{KnowledgeIndex, load_documents};
//!
//! let docs = load_documents(&paths).await?;
//! let index = KnowledgeIndex::build(&docs);
//! for category in index.categories() {
//!     println!("{category}");
//! }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod mcp;
pub mod org;

// Re-exports for convenience
pub use config::OrgConfig;
pub use org::{
    KnowledgeIndex, OrgDocument, OrgMetadata, ResourceAddress, extract_metadata, load_documents,
};

/// Error type for orgmcp operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidAddress` | A resource URI does not parse into any known address shape |
/// | `NotFound` | A well-formed address matched zero documents |
/// | `Io` | A configured org file became unreadable between validation and access |
/// | `InvalidInput` | Missing or malformed request parameters, bad config values |
/// | `OperationFailed` | Config file errors, transport I/O errors, task join failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// A resource address did not match any known shape.
    ///
    /// Raised when:
    /// - The URI carries a scheme other than `org://`
    /// - The path is not one of `all`, `file/<name>`, `category/<cat>`,
    ///   or `category/<cat>/filetag/<tag>`
    /// - A required address segment is empty
    ///
    /// Distinct from [`Error::NotFound`]: the address could not even be
    /// parsed, so no document lookup was attempted.
    #[error("invalid resource address: {0}")]
    InvalidAddress(String),

    /// A well-formed address matched zero documents.
    ///
    /// Raised when:
    /// - `file/<name>` names no file in the batch
    /// - `category/<cat>` (with or without a filetag) selects an empty set
    ///
    /// The message names what currently exists so callers can render
    /// useful guidance.
    #[error("no documents match: {0}")]
    NotFound(String),

    /// A configured org file could not be read.
    ///
    /// Raised when a file disappeared or lost read permission between
    /// config validation and the batch read. Fails the whole batch; partial
    /// results are never surfaced.
    #[error("failed to read '{path}': {cause}")]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O cause.
        cause: String,
    },

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - Required prompt arguments are missing (e.g. `category`)
    /// - A prompt argument has an unrecognized value (e.g. `time_scope`)
    /// - The config file lists no org file patterns
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - The config file is missing or not valid TOML
    /// - Glob patterns expand to zero files overall
    /// - stdin/stdout transport I/O fails
    /// - A spawned read task fails to join
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for orgmcp operations.
pub type Result<T> = std::result::Result<T, Error>;
