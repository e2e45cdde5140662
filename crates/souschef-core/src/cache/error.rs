use thiserror::Error;

use crate::api::ApiError;
use crate::models::ParseError;

/// Why a refresh left the catalog unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to fetch recipes: {0}")]
    Network(#[from] ApiError),

    #[error("Failed to write recipe cache: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to parse recipes: {0}")]
    Parse(#[from] ParseError),
}

/// Why seeding the shared container from the bundled catalog did not happen.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Failed to read bundled recipes: {0}")]
    BundleUnreadable(#[source] std::io::Error),

    #[error("Failed to copy bundled recipes into the shared container: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to record that bundled recipes were copied: {0}")]
    Flag(#[source] std::io::Error),
}
