//! Application configuration management.
//!
//! The configuration names where the shared container lives, which URL the
//! catalog is fetched from, and optionally a bundled catalog file to seed
//! the container with instead of the one compiled into the binary.
//!
//! Configuration is stored at `~/.config/souschef/config.json`. The
//! `SOUSCHEF_CONTAINER_DIR` and `SOUSCHEF_REMOTE_URL` environment variables
//! take precedence over the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::REMOTE_CATALOG_URL;
use crate::cache::BundledCatalog;

/// Application name used for config/data directory paths
const APP_NAME: &str = "souschef";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// App group shared by the application and its companion extension
pub const APP_GROUP_IDENTIFIER: &str = "group.com.gts8.edheroage";

pub const CONTAINER_DIR_ENV: &str = "SOUSCHEF_CONTAINER_DIR";
pub const REMOTE_URL_ENV: &str = "SOUSCHEF_REMOTE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub remote_url: Option<String>,
    pub container_dir: Option<PathBuf>,
    pub bundled_catalog: Option<PathBuf>,
    /// Unset means the HTTP transport default.
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Location of the config file.
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Shared container directory holding the cached catalog.
    pub fn container_dir(&self) -> Result<PathBuf> {
        self.resolve_container_dir(std::env::var_os(CONTAINER_DIR_ENV).map(PathBuf::from))
    }

    fn resolve_container_dir(&self, env_override: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = env_override.or_else(|| self.container_dir.clone()) {
            return Ok(dir);
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME).join(APP_GROUP_IDENTIFIER))
    }

    pub fn remote_url(&self) -> String {
        self.resolve_remote_url(std::env::var(REMOTE_URL_ENV).ok())
    }

    fn resolve_remote_url(&self, env_override: Option<String>) -> String {
        env_override
            .or_else(|| self.remote_url.clone())
            .unwrap_or_else(|| REMOTE_CATALOG_URL.to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Bundled catalog to seed from: the configured file, else `embedded`.
    pub fn bundle(&self, embedded: &'static [u8]) -> BundledCatalog {
        match &self.bundled_catalog {
            Some(path) => BundledCatalog::File(path.clone()),
            None => BundledCatalog::Embedded(embedded),
        }
    }
}
