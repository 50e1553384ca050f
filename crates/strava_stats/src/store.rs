//! Whole-file access to the statistics document.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Where the document lives, for messages.
    fn location(&self) -> String;

    /// Full document text, or `None` when it does not exist yet.
    async fn read(&self) -> io::Result<Option<String>>;

    /// Replace the document with `contents`.
    async fn write(&self, contents: &str) -> io::Result<()>;
}

/// A document on the local filesystem.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a failed write leaves the previous document untouched.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> io::Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn write(&self, contents: &str) -> io::Result<()> {
        let tmp = self.temp_path();
        if let Err(e) = tokio::fs::write(&tmp, contents).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }
        tracing::debug!(path = %self.path.display(), bytes = contents.len(), "document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("README.md"));
        assert_eq!(store.read().await.expect("read"), None);
    }

    #[tokio::test]
    async fn write_then_read_replaces_whole_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("README.md");
        std::fs::write(&path, "old contents that are much longer than the new ones\n").unwrap();
        let store = FileStore::new(&path);
        store.write("new\n").await.expect("write");
        assert_eq!(store.read().await.expect("read").as_deref(), Some("new\n"));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails_and_keeps_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("nope").join("README.md"));
        assert!(store.write("x").await.is_err());
        assert!(!dir.path().join("nope").exists());
    }

    #[test]
    fn temp_path_is_a_sibling() {
        let store = FileStore::new("/repo/README.md");
        assert_eq!(store.temp_path(), PathBuf::from("/repo/README.md.tmp"));
    }
}
