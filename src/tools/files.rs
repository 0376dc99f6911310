//! File store — named text blobs under one fixed base directory.
//!
//! Last write wins; nothing is ever deleted. The base directory comes from
//! configuration, never from a tool call.

use std::path::PathBuf;

use crate::types::{Error, Result};

#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Write `content` as the full contents of `name`, creating the base
    /// directory first if needed.
    pub async fn save(&self, name: &str, content: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_dir).await?;
        tokio::fs::write(self.path_for(name), content.as_bytes()).await?;
        tracing::debug!(file = name, bytes = content.len(), "saved file");
        Ok(())
    }

    /// Full text contents of `name`.
    pub async fn get(&self, name: &str) -> Result<String> {
        match tokio::fs::read_to_string(self.path_for(name)).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::not_found(format!("File {} not found", name)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Names of the entries directly inside the base directory, sorted.
    ///
    /// A base directory that does not exist yet lists as empty.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("store"));

        let content = "line one\nline two with 'quotes' and ünïcödé\n\n";
        store.save("doc.md", content).await.unwrap();
        assert_eq!(store.get("doc.md").await.unwrap(), content);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save("KEY", "first").await.unwrap();
        store.save("KEY", "second").await.unwrap();
        assert_eq!(store.get("KEY").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let err = store.get("never-saved").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "{err:?}");
        assert!(err.to_string().contains("never-saved"));
    }

    #[tokio::test]
    async fn test_list_is_flat_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save("b", "2").await.unwrap();
        store.save("a", "1").await.unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("deep"), "x").unwrap();

        assert_eq!(store.list().await.unwrap(), vec!["a", "b", "sub"]);
    }

    #[tokio::test]
    async fn test_list_empty_and_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileStore::new(dir.path()).list().await.unwrap().is_empty());
        assert!(FileStore::new(dir.path().join("absent"))
            .list()
            .await
            .unwrap()
            .is_empty());
    }
}
