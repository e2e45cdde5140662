//! Local caching of the recipe catalog for offline access.
//!
//! This module provides the `RecipeStore` that seeds, loads, refreshes, and
//! serves the catalog. The raw catalog document lives as `Recipes.json` in
//! the app-group container shared with the companion extension, alongside
//! the shared defaults that record whether the bundled catalog was copied.
//!
//! Storage, defaults, and the bundled catalog sit behind small seams
//! (`CatalogStorage`, `SharedDefaults`, `BundledCatalog`) so the store can
//! be exercised without a real container.

pub mod atomic;
pub mod bundle;
pub mod defaults;
pub mod error;
pub mod storage;
pub mod store;

pub use bundle::BundledCatalog;
pub use defaults::{FileDefaults, SharedDefaults, RECIPES_COPIED_KEY};
pub use error::{BootstrapError, StoreError};
pub use storage::{CatalogStorage, ContainerStorage, RECIPES_FILE_NAME};
pub use store::{BootstrapStatus, Catalog, RecipeStore, RefreshOutcome};
