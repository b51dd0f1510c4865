//! Resource address grammar.
//!
//! Addresses route a request to the whole corpus, one file, one category,
//! or one category×tag intersection. Parsing is a total decision procedure
//! into a tagged variant; anything that fits none of the four shapes is an
//! invalid address, which is distinct from a valid address that matches no
//! documents.

use crate::{Error, Result};
use std::fmt;

/// URI scheme prefix for org resources.
pub const SCHEME: &str = "org://";

/// Marker separating the category and tag segments of a combined address.
const FILETAG_MARKER: &str = "/filetag/";

/// A parsed resource address.
///
/// Shapes are checked in precedence order: `all`, `file/<name>`,
/// `category/<cat>/filetag/<tag>`, `category/<cat>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceAddress {
    /// Every document in the batch.
    All,
    /// A single document addressed by file name.
    File(String),
    /// All documents in a category.
    Category(String),
    /// Documents in a category carrying a specific filetag.
    CategoryTag {
        /// The category to filter by.
        category: String,
        /// The filetag to filter by within the category.
        tag: String,
    },
}

impl ResourceAddress {
    /// Parses an address string, with or without the `org://` scheme.
    ///
    /// A category segment containing `/filetag/` is split at the last
    /// marker occurrence, so the tag never contains the marker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] if the string fits none of the
    /// four address shapes or a required segment is empty.
    pub fn parse(address: &str) -> Result<Self> {
        let path = address.strip_prefix(SCHEME).unwrap_or(address);

        if path == "all" {
            return Ok(Self::All);
        }

        if let Some(name) = path.strip_prefix("file/") {
            if name.is_empty() || name.contains('/') {
                return Err(Error::InvalidAddress(address.to_string()));
            }
            return Ok(Self::File(name.to_string()));
        }

        if let Some(rest) = path.strip_prefix("category/") {
            if let Some(split_at) = rest.rfind(FILETAG_MARKER) {
                let category = &rest[..split_at];
                let tag = &rest[split_at + FILETAG_MARKER.len()..];
                if category.is_empty() || tag.is_empty() {
                    return Err(Error::InvalidAddress(address.to_string()));
                }
                return Ok(Self::CategoryTag {
                    category: category.to_string(),
                    tag: tag.to_string(),
                });
            }
            if rest.is_empty() {
                return Err(Error::InvalidAddress(address.to_string()));
            }
            return Ok(Self::Category(rest.to_string()));
        }

        Err(Error::InvalidAddress(address.to_string()))
    }

    /// Returns the scheme-qualified URI for this address.
    #[must_use]
    pub fn uri(&self) -> String {
        format!("{SCHEME}{self}")
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::File(name) => write!(f, "file/{name}"),
            Self::Category(category) => write!(f, "category/{category}"),
            Self::CategoryTag { category, tag } => {
                write!(f, "category/{category}/filetag/{tag}")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all() {
        assert_eq!(ResourceAddress::parse("all").unwrap(), ResourceAddress::All);
        assert_eq!(
            ResourceAddress::parse("org://all").unwrap(),
            ResourceAddress::All
        );
    }

    #[test]
    fn test_parse_file() {
        assert_eq!(
            ResourceAddress::parse("org://file/work.org").unwrap(),
            ResourceAddress::File("work.org".to_string())
        );
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(
            ResourceAddress::parse("org://category/work").unwrap(),
            ResourceAddress::Category("work".to_string())
        );
    }

    #[test]
    fn test_parse_category_tag() {
        assert_eq!(
            ResourceAddress::parse("org://category/work/filetag/urgent").unwrap(),
            ResourceAddress::CategoryTag {
                category: "work".to_string(),
                tag: "urgent".to_string(),
            }
        );
    }

    #[test]
    fn test_category_with_embedded_marker_splits_at_last() {
        // An ambiguous category segment keeps the marker; the tag never
        // contains it.
        let parsed = ResourceAddress::parse("category/a/filetag/b/filetag/c").unwrap();
        assert_eq!(
            parsed,
            ResourceAddress::CategoryTag {
                category: "a/filetag/b".to_string(),
                tag: "c".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_shapes() {
        for address in [
            "",
            "bogus/shape",
            "files/x",
            "file/",
            "file/a/b",
            "category/",
            "category//filetag/t",
            "category/x/filetag/",
            "ALL",
        ] {
            let err = ResourceAddress::parse(address).unwrap_err();
            assert!(
                matches!(err, Error::InvalidAddress(_)),
                "{address} should be invalid"
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        for address in [
            "all",
            "file/work.org",
            "category/work",
            "category/work/filetag/urgent",
        ] {
            let parsed = ResourceAddress::parse(address).unwrap();
            assert_eq!(parsed.to_string(), address);
            assert_eq!(parsed.uri(), format!("org://{address}"));
            assert_eq!(ResourceAddress::parse(&parsed.uri()).unwrap(), parsed);
        }
    }
}
