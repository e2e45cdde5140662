//! The recipe catalog cache.
//!
//! `RecipeStore` owns the catalog document in the shared container and the
//! in-memory catalog derived from it. The in-memory catalog is loaded from
//! disk on first access and afterwards only ever replaced as a whole by a
//! successful refresh.

use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::api::CatalogSource;
use crate::models::{parse_catalog, Recipe};

use super::bundle::BundledCatalog;
use super::defaults::{FileDefaults, SharedDefaults, RECIPES_COPIED_KEY};
use super::error::{BootstrapError, StoreError};
use super::storage::{CatalogStorage, ContainerStorage};

/// Immutable snapshot of the catalog, sorted by name.
pub type Catalog = Arc<Vec<Recipe>>;

/// What a finished refresh hands back to its caller.
///
/// `catalog` is always present: on failure it is the catalog that was
/// current before the refresh started.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub catalog: Catalog,
    pub error: Option<StoreError>,
}

impl RefreshOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of seeding the container from the bundled catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStatus {
    AlreadySeeded,
    NoBundle,
    Seeded,
}

#[derive(Default)]
struct State {
    catalog: Option<Catalog>,
    refreshed_at: Option<DateTime<Utc>>,
}

pub struct RecipeStore {
    source: Arc<dyn CatalogSource>,
    storage: Arc<dyn CatalogStorage>,
    defaults: Arc<dyn SharedDefaults>,
    bundle: BundledCatalog,
    state: RwLock<State>,
}

impl RecipeStore {
    /// Create a store and seed the cache from the bundle on first launch.
    pub fn new(
        source: Arc<dyn CatalogSource>,
        storage: Arc<dyn CatalogStorage>,
        defaults: Arc<dyn SharedDefaults>,
        bundle: BundledCatalog,
    ) -> Self {
        let store = Self {
            source,
            storage,
            defaults,
            bundle,
            state: RwLock::new(State::default()),
        };
        store.bootstrap();
        store
    }

    /// Create a store backed by the catalog and defaults files in `container_dir`.
    pub fn open(
        container_dir: &Path,
        source: Arc<dyn CatalogSource>,
        bundle: BundledCatalog,
    ) -> Self {
        debug!(container = %container_dir.display(), "Opening recipe store");
        Self::new(
            source,
            Arc::new(ContainerStorage::new(container_dir)),
            Arc::new(FileDefaults::new(container_dir)),
            bundle,
        )
    }

    // =========================================================================
    // Bootstrap
    // =========================================================================

    /// Copy the bundled catalog into the container if that has not happened yet.
    ///
    /// Never fails: problems are logged and the copy is retried next launch.
    pub fn bootstrap(&self) {
        match self.try_bootstrap() {
            Ok(BootstrapStatus::Seeded) => info!("Copied bundled recipes into shared container"),
            Ok(BootstrapStatus::NoBundle) => debug!("No bundled recipes found, cache left empty"),
            Ok(BootstrapStatus::AlreadySeeded) => {}
            Err(e) => error!(error = %e, "Bootstrap failed"),
        }
    }

    pub fn try_bootstrap(&self) -> Result<BootstrapStatus, BootstrapError> {
        if self.defaults.bool_for_key(RECIPES_COPIED_KEY) {
            return Ok(BootstrapStatus::AlreadySeeded);
        }

        let bytes = match self.bundle.read().map_err(BootstrapError::BundleUnreadable)? {
            Some(bytes) => bytes,
            None => return Ok(BootstrapStatus::NoBundle),
        };

        self.storage.write(&bytes).map_err(BootstrapError::Write)?;
        self.defaults
            .set_bool(RECIPES_COPIED_KEY, true)
            .map_err(BootstrapError::Flag)?;
        Ok(BootstrapStatus::Seeded)
    }

    // =========================================================================
    // Catalog Access
    // =========================================================================

    /// Current catalog snapshot.
    ///
    /// The first call reads the cache file; later calls return the same
    /// snapshot until a refresh replaces it.
    pub fn catalog(&self) -> Catalog {
        if let Some(catalog) = self.read_state().catalog.clone() {
            return catalog;
        }

        let mut state = self.write_state();
        // Another caller may have loaded it while we waited for the lock
        if let Some(catalog) = &state.catalog {
            return catalog.clone();
        }
        let catalog = Arc::new(self.load_cached());
        state.catalog = Some(catalog.clone());
        catalog
    }

    /// When the catalog was last replaced from the remote source in this process.
    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.read_state().refreshed_at
    }

    fn load_cached(&self) -> Vec<Recipe> {
        let bytes = match self.storage.read() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No cached recipes");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read recipe cache");
                return Vec::new();
            }
        };

        match parse_catalog(&bytes) {
            Ok(recipes) => {
                debug!(count = recipes.len(), "Loaded cached recipes");
                recipes
            }
            Err(e) => {
                warn!(error = %e, "Cached recipes are unreadable");
                Vec::new()
            }
        }
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Fetch the remote catalog and replace the cached one.
    ///
    /// The document is validated before the cache file is touched, and the
    /// in-memory catalog is swapped only after the file write succeeds. Any
    /// failure leaves both unchanged. Concurrent refreshes are not
    /// coalesced; the last one to finish wins.
    pub async fn refresh(&self) -> RefreshOutcome {
        let error = match self.source.fetch().await {
            Ok(bytes) => self.apply(&bytes).err(),
            Err(e) => Some(StoreError::Network(e)),
        };

        if let Some(ref e) = error {
            warn!(error = %e, "Refresh failed, keeping current recipes");
        }

        RefreshOutcome {
            catalog: self.catalog(),
            error,
        }
    }

    /// Spawn a refresh and deliver its outcome to `tx`.
    pub fn refresh_in_background(self: &Arc<Self>, tx: mpsc::Sender<RefreshOutcome>) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = store.refresh().await;
            if let Err(e) = tx.send(outcome).await {
                error!(error = %e, "Failed to deliver refresh result - channel closed");
            }
        })
    }

    fn apply(&self, bytes: &[u8]) -> Result<Catalog, StoreError> {
        let recipes = parse_catalog(bytes)?;
        self.storage.write(bytes).map_err(StoreError::Write)?;

        let catalog = Arc::new(recipes);
        let mut state = self.write_state();
        state.catalog = Some(catalog.clone());
        state.refreshed_at = Some(Utc::now());
        info!(count = catalog.len(), "Recipes refreshed");
        Ok(catalog)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ============================================================================
// Tests
// ============================================================================
