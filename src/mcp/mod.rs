//! MCP server implementation.
//!
//! Provides the Model Context Protocol surface over the org knowledge base.
//!
//! ## Features
//!
//! - **Resources**: the corpus, single files, categories, and category×tag
//!   intersections via `org://` URIs
//! - **Prompts**: `review-due-items`, `summarize-category`
//! - **Tools**: wired but empty (the knowledge base is read-only)
//!
//! ## Usage
//!
//! ### Stdio Transport (Claude Desktop)
//!
//! ```bash
//! orgmcp serve
//! ```
//!
//! ### Claude Desktop Configuration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "orgmcp": {
//!       "command": "orgmcp",
//!       "args": ["serve"]
//!     }
//!   }
//! }
//! ```

// Allow unused_self for methods kept for API consistency.
#![allow(clippy::unused_self)]
// Allow option_if_let_else for clearer match statements.
#![allow(clippy::option_if_let_else)]

mod prompts;
mod resources;
mod server;
mod tools;

pub use prompts::{
    PromptArgument, PromptContent, PromptDefinition, PromptMessage, PromptRegistry,
    ResourceReference,
};
pub use resources::{MIME_TYPE, ResourceContent, ResourceDefinition, ResourceHandler};
pub use server::McpServer;
pub use tools::{ToolContent, ToolDefinition, ToolRegistry, ToolResult};
