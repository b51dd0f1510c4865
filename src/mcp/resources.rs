//! MCP resource handlers.
//!
//! Exposes the org knowledge base via the `org://` URI scheme. Every list
//! and read operation works over a freshly loaded batch, so responses are
//! always consistent with the files' on-disk state at call time.

use crate::org::{ResourceAddress, build_catalog, load_documents, resolve};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// MIME type for all org resources.
pub const MIME_TYPE: &str = "text/plain";

/// Handler for MCP resources (`org://` scheme).
pub struct ResourceHandler {
    /// Configured org file paths, in canonical batch order.
    paths: Vec<PathBuf>,
}

impl ResourceHandler {
    /// Creates a resource handler over the configured path list.
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Lists all addressable resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot be loaded.
    pub async fn list_resources(&self) -> Result<Vec<ResourceDefinition>> {
        let documents = load_documents(&self.paths).await?;

        Ok(build_catalog(&documents)
            .into_iter()
            .map(|entry| ResourceDefinition {
                uri: entry.address.uri(),
                name: entry.display_name,
                description: Some(entry.description),
                mime_type: Some(MIME_TYPE.to_string()),
            })
            .collect())
    }

    /// Reads a resource by URI.
    ///
    /// The address is parsed before any I/O, so a malformed URI fails as
    /// [`crate::Error::InvalidAddress`] without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAddress`] for unparseable URIs,
    /// [`crate::Error::NotFound`] when nothing matches, or an I/O error if
    /// the batch reload fails.
    pub async fn read_resource(&self, uri: &str) -> Result<ResourceContent> {
        let address = ResourceAddress::parse(uri)?;
        let documents = load_documents(&self.paths).await?;
        let text = resolve(&address, &documents)?;

        Ok(ResourceContent {
            uri: address.uri(),
            mime_type: Some(MIME_TYPE.to_string()),
            text: Some(text),
        })
    }
}

/// Definition of an MCP resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Resource URI.
    pub uri: String,
    /// Human-readable name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// MIME type of the resource.
    pub mime_type: Option<String>,
}

/// Content of an MCP resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContent {
    /// Resource URI.
    pub uri: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Text content.
    pub text: Option<String>,
}
