//! Remote catalog access.
//!
//! This module provides the `CatalogSource` seam and its HTTP
//! implementation, `CatalogClient`, which downloads the published recipe
//! document with caching disabled.

pub mod client;
pub mod error;

pub use client::{CatalogClient, CatalogSource, REMOTE_CATALOG_URL};
pub use error::ApiError;
