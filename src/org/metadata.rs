//! Org header metadata extraction.
//!
//! Scans the header section of an org file for `#+CATEGORY:`, `#+TITLE:`,
//! and `#+FILETAGS:` lines. The scan stops at the first headline; header
//! syntax appearing after a headline is body text and is ignored.

use crate::org::OrgMetadata;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Creates a compile-time verified regex wrapped in [`LazyLock`].
///
/// # Safety
///
/// The regex pattern is verified at compile time and cannot fail at runtime.
/// The `unreachable!()` branch exists only for type checking.
macro_rules! lazy_regex {
    ($pattern:expr) => {
        LazyLock::new(|| Regex::new($pattern).unwrap_or_else(|_| unreachable!()))
    };
}

/// A headline: one or more leading stars followed by whitespace.
static HEADLINE_PATTERN: LazyLock<Regex> = lazy_regex!(r"^\*+\s");

/// `#+CATEGORY: <value>`, case-insensitive, whole line.
static CATEGORY_PATTERN: LazyLock<Regex> = lazy_regex!(r"(?i)^#\+CATEGORY:\s*(.+)$");

/// `#+TITLE: <value>`, case-insensitive, whole line.
static TITLE_PATTERN: LazyLock<Regex> = lazy_regex!(r"(?i)^#\+TITLE:\s*(.+)$");

/// `#+FILETAGS: :tag1:tag2:`, case-insensitive, whole line.
static FILETAGS_PATTERN: LazyLock<Regex> = lazy_regex!(r"(?i)^#\+FILETAGS:\s*(.+)$");

/// Extracts header metadata from raw org file content.
///
/// Pure and infallible: malformed headers are skipped, and a file with no
/// recognized headers yields empty metadata. `#+CATEGORY:` and `#+TITLE:`
/// are first-wins; `#+FILETAGS:` lines accumulate in order.
#[must_use]
pub fn extract_metadata(file_path: &Path, content: &str) -> OrgMetadata {
    let file_name = file_path.file_name().map_or_else(
        || file_path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );

    let mut category: Option<String> = None;
    let mut title: Option<String> = None;
    let mut file_tags: Vec<String> = Vec::new();

    for line in content.lines() {
        // Everything at or after the first headline is body text.
        if HEADLINE_PATTERN.is_match(line) {
            break;
        }

        if let Some(caps) = CATEGORY_PATTERN.captures(line) {
            if category.is_none() {
                category = caps.get(1).map(|m| m.as_str().trim().to_string());
            }
            continue;
        }

        if let Some(caps) = TITLE_PATTERN.captures(line) {
            if title.is_none() {
                title = caps.get(1).map(|m| m.as_str().trim().to_string());
            }
            continue;
        }

        if let Some(caps) = FILETAGS_PATTERN.captures(line) {
            if let Some(value) = caps.get(1) {
                // Colon-delimited form `:tag1:tag2:`; empty segments from
                // leading, trailing, or doubled colons are dropped.
                file_tags.extend(
                    value
                        .as_str()
                        .trim()
                        .split(':')
                        .filter(|segment| !segment.trim().is_empty())
                        .map(ToString::to_string),
                );
            }
        }
    }

    OrgMetadata {
        file_path: file_path.to_path_buf(),
        file_name,
        category,
        title,
        file_tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use test_case::test_case;

    fn extract(content: &str) -> OrgMetadata {
        extract_metadata(&PathBuf::from("/path/to/test.org"), content)
    }

    #[test]
    fn test_extract_category_and_title() {
        let metadata = extract("#+TITLE: My Work Projects\n#+CATEGORY: work\n\n* Headline 1");

        assert_eq!(metadata.category.as_deref(), Some("work"));
        assert_eq!(metadata.title.as_deref(), Some("My Work Projects"));
        assert_eq!(metadata.file_name, "test.org");
        assert_eq!(metadata.file_path, PathBuf::from("/path/to/test.org"));
    }

    #[test]
    fn test_extract_filetags() {
        let metadata = extract("#+FILETAGS: :urgent:client:\n\n* Headline 1");
        assert_eq!(metadata.file_tags, vec!["urgent", "client"]);
    }

    #[test]
    fn test_filetags_empty_segments_dropped() {
        let metadata = extract("#+FILETAGS: :a:b:c:");
        assert_eq!(metadata.file_tags, vec!["a", "b", "c"]);

        let metadata = extract("#+FILETAGS: :x::y:");
        assert_eq!(metadata.file_tags, vec!["x", "y"]);
    }

    #[test]
    fn test_filetags_accumulate_across_lines() {
        let metadata = extract("#+FILETAGS: :a:\n#+FILETAGS: :b:a:");
        assert_eq!(metadata.file_tags, vec!["a", "b", "a"]);
    }

    #[test_case("#+title: T" ; "lowercase")]
    #[test_case("#+TITLE: T" ; "uppercase")]
    #[test_case("#+Title: T" ; "mixed case")]
    fn test_header_match_is_case_insensitive(line: &str) {
        let metadata = extract(line);
        assert_eq!(metadata.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_scan_stops_at_first_headline() {
        let metadata = extract("#+CATEGORY: work\n\n* H1\n#+CATEGORY: life");
        assert_eq!(metadata.category.as_deref(), Some("work"));
    }

    #[test]
    fn test_headers_after_headline_ignored_entirely() {
        let metadata = extract("* Headline\n#+TITLE: Hidden\n#+FILETAGS: :x:");
        assert_eq!(metadata.title, None);
        assert!(metadata.file_tags.is_empty());
    }

    #[test]
    fn test_first_category_wins() {
        let metadata = extract("#+CATEGORY: work\n#+CATEGORY: life\n\n* H1");
        assert_eq!(metadata.category.as_deref(), Some("work"));
    }

    #[test]
    fn test_no_metadata() {
        let metadata = extract("* Headline 1\n* Headline 2");
        assert_eq!(metadata.category, None);
        assert_eq!(metadata.title, None);
        assert!(metadata.file_tags.is_empty());
    }

    #[test]
    fn test_blank_and_unrecognized_lines_skipped() {
        let metadata = extract("\nsome prose\n#+OPTIONS: toc:nil\n#+CATEGORY: notes\n");
        assert_eq!(metadata.category.as_deref(), Some("notes"));
    }

    #[test]
    fn test_value_surrounding_whitespace_trimmed() {
        let metadata = extract("#+CATEGORY:    work  ");
        assert_eq!(metadata.category.as_deref(), Some("work"));
    }
}
