//! Per-run cache of table file contents.

use ll_core::{LlError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File contents keyed by path, read at most once per repository.
///
/// The repository is owned by whoever drives a run; dropping it drops the cache.
#[derive(Debug, Default)]
pub struct TableRepository {
    cache: RwLock<HashMap<PathBuf, Arc<str>>>,
}

impl TableRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of `path`, from the cache when already read.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Arc<str>> {
        let path = path.as_ref();
        if let Some(hit) = self.cache.read().get(path) {
            return Ok(Arc::clone(hit));
        }
        let text = std::fs::read_to_string(path).map_err(|e| LlError::io(path, e))?;
        let text: Arc<str> = Arc::from(text);
        tracing::debug!(path = %path.display(), bytes = text.len(), "table loaded");
        self.cache.write().insert(path.to_path_buf(), Arc::clone(&text));
        Ok(text)
    }

    /// Like [`read`](Self::read), but a missing file is `None`.
    pub fn read_optional(&self, path: impl AsRef<Path>) -> Result<Option<Arc<str>>> {
        match self.read(path) {
            Ok(text) => Ok(Some(text)),
            Err(LlError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Seed the cache without touching the filesystem.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<Arc<str>>) {
        self.cache.write().insert(path.into(), contents.into());
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_caches_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("map.txt");
        std::fs::write(&path, "a\t口\n").unwrap();

        let repo = TableRepository::new();
        let first = repo.read(&path).unwrap();
        std::fs::write(&path, "changed").unwrap();
        let second = repo.read(&path).unwrap();
        assert_eq!(&*first, "a\t口\n");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_separate_repositories_do_not_share() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("freq.txt");
        std::fs::write(&path, "one").unwrap();
        let _ = TableRepository::new().read(&path).unwrap();
        std::fs::write(&path, "two").unwrap();
        assert_eq!(&*TableRepository::new().read(&path).unwrap(), "two");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let repo = TableRepository::new();
        let path = dir.path().join("absent.txt");
        assert!(matches!(repo.read(&path), Err(LlError::Io { .. })));
        assert!(repo.read_optional(&path).unwrap().is_none());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_insert_seeds_cache() {
        let repo = TableRepository::new();
        repo.insert("virtual.txt", "x");
        assert_eq!(&*repo.read("virtual.txt").unwrap(), "x");
    }
}
