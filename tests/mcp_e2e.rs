//! MCP server end-to-end tests.
//!
//! Tests MCP server components in integration, focusing on:
//! - Resource listing and reads over real files
//! - Prompt registration and message generation
//! - The empty tool surface
//! - Error taxonomy at the protocol boundary
//!
//! These tests verify the MCP surface without an external client - they
//! drive the public component APIs directly.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn fixture_paths(dir: &TempDir) -> Vec<PathBuf> {
    vec![
        write_file(
            dir,
            "projects.org",
            "#+TITLE: Projects\n#+CATEGORY: work\n#+FILETAGS: :urgent:client:\n\n* TODO Ship",
        ),
        write_file(dir, "home.org", "#+CATEGORY: home\n\n* Garden"),
        write_file(dir, "inbox.org", "* Uncategorized capture"),
    ]
}

mod resource_handler {
    use super::*;
    use orgmcp::Error;
    use orgmcp::mcp::{MIME_TYPE, ResourceHandler};

    #[tokio::test]
    async fn test_listing_order_and_metadata() {
        let dir = TempDir::new().unwrap();
        let handler = ResourceHandler::new(fixture_paths(&dir));

        let resources = handler.list_resources().await.unwrap();
        let uris: Vec<&str> = resources.iter().map(|r| r.uri.as_str()).collect();

        // all, files in batch order, categories lexicographic with nested tags.
        assert_eq!(
            uris,
            vec![
                "org://all",
                "org://file/projects.org",
                "org://file/home.org",
                "org://file/inbox.org",
                "org://category/home",
                "org://category/work",
                "org://category/work/filetag/client",
                "org://category/work/filetag/urgent",
            ]
        );

        // Title is preferred for display, file name is the fallback.
        assert_eq!(resources[1].name, "Projects");
        assert_eq!(resources[2].name, "home.org");
        assert!(resources.iter().all(|r| r.mime_type.as_deref() == Some(MIME_TYPE)));
    }

    #[tokio::test]
    async fn test_read_all_aggregates_uncategorized_files_too() {
        let dir = TempDir::new().unwrap();
        let handler = ResourceHandler::new(fixture_paths(&dir));

        let content = handler.read_resource("org://all").await.unwrap();
        let text = content.text.unwrap();
        assert!(text.contains("* TODO Ship"));
        assert!(text.contains("* Garden"));
        assert!(text.contains("* Uncategorized capture"));
    }

    #[tokio::test]
    async fn test_error_taxonomy() {
        let dir = TempDir::new().unwrap();
        let handler = ResourceHandler::new(fixture_paths(&dir));

        // Malformed shape: invalid address, not a lookup failure.
        let err = handler.read_resource("org://nope").await.unwrap_err();
        assert!(matches!(err, Error::InvalidAddress(_)));

        // Well-formed shapes that match nothing: not found.
        for uri in [
            "org://file/missing.org",
            "org://category/absent",
            "org://category/work/filetag/calm",
        ] {
            let err = handler.read_resource(uri).await.unwrap_err();
            assert!(matches!(err, Error::NotFound(_)), "{uri} should be NotFound");
        }
    }

    #[tokio::test]
    async fn test_not_found_suggests_existing_categories() {
        let dir = TempDir::new().unwrap();
        let handler = ResourceHandler::new(fixture_paths(&dir));

        let err = handler
            .read_resource("org://category/absent")
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("home"));
        assert!(message.contains("work"));
    }

    #[tokio::test]
    async fn test_deleted_file_fails_batch_as_io_error() {
        let dir = TempDir::new().unwrap();
        let mut paths = fixture_paths(&dir);
        paths.push(dir.path().join("deleted.org"));
        let handler = ResourceHandler::new(paths);

        let err = handler.read_resource("org://all").await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("deleted.org"));
    }
}

mod prompt_registry {
    use super::*;
    use orgmcp::mcp::{PromptContent, PromptRegistry};
    use serde_json::json;

    #[test]
    fn test_both_prompts_registered() {
        let registry = PromptRegistry::new();
        let prompts = registry.list_prompts(&["work".to_string()]);

        let names: Vec<&str> = prompts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["review-due-items", "summarize-category"]);
    }

    #[test]
    fn test_review_references_category_address() {
        let registry = PromptRegistry::new();
        let messages = registry
            .get_prompt_messages("review-due-items", &json!({ "category": "work" }))
            .unwrap();

        let has_reference = messages.iter().any(|m| {
            matches!(
                &m.content,
                PromptContent::Resource { resource } if resource.uri == "org://category/work"
            )
        });
        assert!(has_reference);
    }

    #[test]
    fn test_all_time_scopes_accepted() {
        let registry = PromptRegistry::new();
        for scope in ["today", "week", "overdue", "all"] {
            let result = registry.get_prompt_messages(
                "review-due-items",
                &json!({ "category": "work", "time_scope": scope }),
            );
            assert!(result.is_ok(), "scope {scope} should be accepted");
        }
    }
}

mod tool_registry {
    use orgmcp::mcp::ToolRegistry;
    use serde_json::json;

    #[test]
    fn test_tool_surface_is_stub() {
        let registry = ToolRegistry::new();
        assert!(registry.list_tools().is_empty());
        assert!(registry.execute("anything", json!({})).is_err());
    }
}
