//! Concurrent org file loading.
//!
//! Reads a batch of configured paths and extracts metadata from each.
//! Reads run concurrently; the returned batch preserves input path order,
//! which downstream enumeration depends on.

use crate::org::{OrgDocument, extract_metadata};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Loads and parses one org file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub async fn load_document(path: &Path) -> Result<OrgDocument> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::Io {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;

    let metadata = extract_metadata(path, &content);
    Ok(OrgDocument { metadata, content })
}

/// Loads a batch of org files concurrently.
///
/// One read task is spawned per path; results are gathered back in input
/// order regardless of completion order. A batch either completes or fails
/// as a unit: the first unreadable path fails the whole load.
///
/// # Errors
///
/// Returns [`Error::Io`] naming the failing path, or
/// [`Error::OperationFailed`] if a read task panics.
pub async fn load_documents(paths: &[PathBuf]) -> Result<Vec<OrgDocument>> {
    let handles: Vec<_> = paths
        .iter()
        .map(|path| {
            let path = path.clone();
            tokio::spawn(async move { load_document(&path).await })
        })
        .collect();

    let mut documents = Vec::with_capacity(handles.len());
    for handle in handles {
        let document = handle.await.map_err(|e| Error::OperationFailed {
            operation: "join_read_task".to_string(),
            cause: e.to_string(),
        })??;
        documents.push(document);
    }

    tracing::debug!(count = documents.len(), "Loaded org file batch");
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_single_document() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "work.org", "#+CATEGORY: work\n\n* Task");

        let doc = load_document(&path).await.unwrap();

        assert_eq!(doc.metadata.category.as_deref(), Some("work"));
        assert_eq!(doc.metadata.file_name, "work.org");
        assert_eq!(doc.content, "#+CATEGORY: work\n\n* Task");
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let dir = TempDir::new().unwrap();
        let names = ["zeta.org", "alpha.org", "mid.org"];
        let paths: Vec<PathBuf> = names
            .iter()
            .map(|name| write_file(&dir, name, "* H"))
            .collect();

        let docs = load_documents(&paths).await.unwrap();

        let loaded: Vec<&str> = docs.iter().map(|d| d.metadata.file_name.as_str()).collect();
        assert_eq!(loaded, names);
    }

    #[tokio::test]
    async fn test_missing_file_fails_whole_batch() {
        let dir = TempDir::new().unwrap();
        let good = write_file(&dir, "good.org", "* H");
        let missing = dir.path().join("missing.org");

        let result = load_documents(&[good, missing.clone()]).await;

        let err = result.unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if *path == missing));
    }

    #[tokio::test]
    async fn test_empty_batch_loads_empty() {
        let docs = load_documents(&[]).await.unwrap();
        assert!(docs.is_empty());
    }
}
