//! SousChef core - recipe catalog sync and offline cache.
//!
//! The catalog is a small JSON document published at a fixed URL. The
//! `RecipeStore` seeds a shared container from a bundled copy on first
//! launch, serves the cached catalog, and replaces it when a refresh
//! succeeds. Presentation code only ever reads snapshots and asks for
//! refreshes.

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod trigger;
pub mod utils;

pub use api::{ApiError, CatalogClient, CatalogSource};
pub use cache::{BundledCatalog, Catalog, RecipeStore, RefreshOutcome, StoreError};
pub use config::Config;
pub use models::{Ingredient, IngredientType, ParseError, Recipe};
