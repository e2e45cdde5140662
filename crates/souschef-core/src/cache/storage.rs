use std::io;
use std::path::{Path, PathBuf};

use super::atomic::write_atomic;

/// Cache file name inside the shared container
pub const RECIPES_FILE_NAME: &str = "Recipes.json";

/// Where the raw catalog document is kept between launches.
pub trait CatalogStorage: Send + Sync {
    /// Raw cached document, `None` when nothing has been cached yet.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replace the cached document.
    fn write(&self, bytes: &[u8]) -> io::Result<()>;
}

/// Catalog file inside the app-group container.
///
/// The file is shared with the companion extension and there is no
/// cross-process lock; writes are atomic so a reader never sees a partial
/// document, but concurrent writers race with last-rename-wins.
#[derive(Debug, Clone)]
pub struct ContainerStorage {
    path: PathBuf,
}

impl ContainerStorage {
    pub fn new(container_dir: impl AsRef<Path>) -> Self {
        Self {
            path: container_dir.as_ref().join(RECIPES_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStorage for ContainerStorage {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        write_atomic(&self.path, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let storage = ContainerStorage::new(dir.path());
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = ContainerStorage::new(dir.path().join("group.test"));
        storage.write(b"[]").unwrap();

        assert_eq!(storage.read().unwrap().as_deref(), Some(&b"[]"[..]));
        assert!(storage.path().ends_with(RECIPES_FILE_NAME));
    }
}
