//! MCP pre-defined prompts.
//!
//! Two prompt templates over the knowledge base: a due-item review and a
//! category summary. Both embed a `org://category/<cat>` resource
//! reference so the client pulls the current file contents itself.

use crate::org::SCHEME;
use crate::mcp::resources::MIME_TYPE;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Registry of pre-defined prompts.
pub struct PromptRegistry;

impl PromptRegistry {
    /// Creates a new prompt registry.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns all prompt definitions.
    ///
    /// `categories` are the currently indexed categories, surfaced in the
    /// summarize prompt's argument description.
    #[must_use]
    pub fn list_prompts(&self, categories: &[String]) -> Vec<PromptDefinition> {
        let available = if categories.is_empty() {
            "none".to_string()
        } else {
            categories.join(", ")
        };

        vec![
            PromptDefinition {
                name: "review-due-items".to_string(),
                description: Some(
                    "Review TODO items in a specific category, focusing on items due today or overdue"
                        .to_string(),
                ),
                arguments: vec![
                    PromptArgument {
                        name: "category".to_string(),
                        description: Some(
                            "Org category to review (e.g., \"work\", \"personal\")".to_string(),
                        ),
                        required: true,
                    },
                    PromptArgument {
                        name: "time_scope".to_string(),
                        description: Some(
                            "Time focus: \"today\", \"week\", \"overdue\", or \"all\" (default: \"today\")"
                                .to_string(),
                        ),
                        required: false,
                    },
                ],
            },
            PromptDefinition {
                name: "summarize-category".to_string(),
                description: Some(
                    "Get a comprehensive summary of all org files in a specific category"
                        .to_string(),
                ),
                arguments: vec![PromptArgument {
                    name: "category".to_string(),
                    description: Some(format!("Category to summarize. Available: {available}")),
                    required: true,
                }],
            },
        ]
    }

    /// Generates prompt messages for a given prompt and arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for unknown prompts, a missing
    /// `category` argument, or an unrecognized `time_scope`.
    pub fn get_prompt_messages(&self, name: &str, arguments: &Value) -> Result<Vec<PromptMessage>> {
        match name {
            "review-due-items" => Self::generate_review_due_items(arguments),
            "summarize-category" => Self::generate_summarize_category(arguments),
            _ => Err(Error::InvalidInput(format!("unknown prompt: {name}"))),
        }
    }

    /// Generates the due-item review prompt.
    fn generate_review_due_items(arguments: &Value) -> Result<Vec<PromptMessage>> {
        let category = required_category(arguments)?;
        let scope = arguments
            .get("time_scope")
            .and_then(Value::as_str)
            .map_or(Ok(TimeScope::Today), TimeScope::parse)?;

        let today = chrono::Local::now().format("%Y-%m-%d");
        let scope_text = scope.phrase();

        Ok(vec![
            PromptMessage {
                role: "user".to_string(),
                content: PromptContent::Text {
                    text: format!(
                        "Please review all TODO items in my \"{category}\" org files. \
                         Focus on items {scope_text}.\n\n\
                         Provide:\n\
                         1. A prioritized list of what I should focus on\n\
                         2. Any items that may be at risk of becoming overdue\n\
                         3. Suggestions for rescheduling or breaking down large tasks\n\
                         4. Any blockers or dependencies I should be aware of\n\n\
                         Here are the org files for the \"{category}\" category:"
                    ),
                },
            },
            category_resource_message(category),
            PromptMessage {
                role: "user".to_string(),
                content: PromptContent::Text {
                    text: format!("Today's date: {today}\nTime scope: {scope_text}"),
                },
            },
        ])
    }

    /// Generates the category summary prompt.
    fn generate_summarize_category(arguments: &Value) -> Result<Vec<PromptMessage>> {
        let category = required_category(arguments)?;

        Ok(vec![
            PromptMessage {
                role: "user".to_string(),
                content: PromptContent::Text {
                    text: format!(
                        "Please provide a comprehensive summary of all org files in the \
                         \"{category}\" category.\n\n\
                         Include:\n\
                         1. Key themes and topics\n\
                         2. Important TODO items and their status\n\
                         3. Recent changes or updates\n\
                         4. Any patterns or insights you notice\n\n\
                         Here are the org files:"
                    ),
                },
            },
            category_resource_message(category),
        ])
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the required `category` argument.
fn required_category(arguments: &Value) -> Result<&str> {
    arguments
        .get("category")
        .and_then(Value::as_str)
        .filter(|category| !category.is_empty())
        .ok_or_else(|| Error::InvalidInput("missing required argument: category".to_string()))
}

/// Builds the embedded resource message referencing a category address.
fn category_resource_message(category: &str) -> PromptMessage {
    PromptMessage {
        role: "user".to_string(),
        content: PromptContent::Resource {
            resource: ResourceReference {
                uri: format!("{SCHEME}category/{category}"),
                mime_type: MIME_TYPE.to_string(),
            },
        },
    }
}

/// Time focus for the due-item review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeScope {
    /// Items due today or overdue.
    Today,
    /// Items due this week.
    Week,
    /// Overdue items only.
    Overdue,
    /// Everything.
    All,
}

impl TimeScope {
    /// Parses a scope string; anything unrecognized is an invalid argument.
    fn parse(s: &str) -> Result<Self> {
        match s {
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "overdue" => Ok(Self::Overdue),
            "all" => Ok(Self::All),
            other => Err(Error::InvalidInput(format!(
                "invalid time_scope: {other}. Must be one of: today, week, overdue, all"
            ))),
        }
    }

    /// Human phrasing used in the prompt text.
    const fn phrase(self) -> &'static str {
        match self {
            Self::Today => "due today or overdue",
            Self::Week => "due this week",
            Self::Overdue => "overdue",
            Self::All => "all",
        }
    }
}

/// Definition of a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Prompt name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Prompt arguments.
    pub arguments: Vec<PromptArgument>,
}

/// Argument for a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptArgument {
    /// Argument name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the argument is required.
    pub required: bool,
}

/// A message in a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    /// Role: user, assistant, or system.
    pub role: String,
    /// Message content.
    pub content: PromptContent,
}

/// Content of a prompt message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PromptContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
    /// Embedded resource reference.
    Resource {
        /// The referenced resource.
        resource: ResourceReference,
    },
}

/// Reference to a resource by URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceReference {
    /// Resource URI.
    pub uri: String,
    /// MIME type of the referenced resource.
    pub mime_type: String,
}
