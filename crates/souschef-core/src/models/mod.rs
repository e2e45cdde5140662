//! Data models for the recipe catalog.
//!
//! - `Recipe`, `Ingredient`: catalog entries as the presentation layer reads them
//! - `IngredientType`: closed set of grocery categories
//! - `parse_catalog` / `encode_catalog`: the catalog document format

pub mod catalog;
pub mod recipe;

pub use catalog::{encode_catalog, parse_catalog, sort_by_name, ParseError};
pub use recipe::{Ingredient, IngredientType, Recipe, UnknownIngredientType};
