//! Preferences shared through the app-group container.
//!
//! `FileDefaults` keeps a flat JSON object of boolean flags next to the
//! cached catalog, so the companion extension sees the same values.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use super::atomic::write_atomic;

/// Preferences file name inside the shared container
pub const DEFAULTS_FILE_NAME: &str = "SharedDefaults.json";

/// Key recording that the bundled catalog was copied into the container
pub const RECIPES_COPIED_KEY: &str = "com.xb.souschef.recipesCopied";

pub trait SharedDefaults: Send + Sync {
    /// Stored flag, `false` when unset.
    fn bool_for_key(&self, key: &str) -> bool;

    fn set_bool(&self, key: &str, value: bool) -> io::Result<()>;
}

#[derive(Debug)]
pub struct FileDefaults {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileDefaults {
    pub fn new(container_dir: impl AsRef<Path>) -> Self {
        Self {
            path: container_dir.as_ref().join(DEFAULTS_FILE_NAME),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> io::Result<BTreeMap<String, bool>> {
        let contents = match std::fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e),
        };
        serde_json::from_slice(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl SharedDefaults for FileDefaults {
    fn bool_for_key(&self, key: &str) -> bool {
        match self.load() {
            Ok(values) => values.get(key).copied().unwrap_or(false),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read shared defaults");
                false
            }
        }
    }

    fn set_bool(&self, key: &str, value: bool) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // An unreadable file is replaced rather than blocking the write
        let mut values = self.load().unwrap_or_default();
        values.insert(key.to_string(), value);
        let contents = serde_json::to_vec_pretty(&values)?;
        write_atomic(&self.path, &contents)
    }
}
