//! Catalog document decoding.
//!
//! The document is walked as a generic JSON value. Field decoding is
//! lenient: missing strings decode as empty, numbers are accepted where
//! strings are expected, and timers may arrive as numeric strings. Two rules
//! fail the whole document: every ingredient tag must name an
//! [`IngredientType`], and every recipe needs one timer per step.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::recipe::{Ingredient, IngredientType, Recipe};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed catalog document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Catalog document must be an array or object of recipes")]
    UnexpectedShape,

    #[error("Recipe record {index} is not an object")]
    InvalidRecord { index: usize },

    #[error("Unknown ingredient type {value:?} in recipe {recipe:?}")]
    UnknownIngredientType { recipe: String, value: String },

    #[error("Steps and timers are not 1:1 for recipe {recipe:?}: {steps} steps, {timers} timers")]
    StepTimerMismatch {
        recipe: String,
        steps: usize,
        timers: usize,
    },
}

/// Decode a catalog document into recipes sorted by name.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<Recipe>, ParseError> {
    let document: Value = serde_json::from_slice(bytes)?;

    let records: Vec<&Value> = match &document {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => return Err(ParseError::UnexpectedShape),
    };

    let mut recipes = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| parse_recipe(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    sort_by_name(&mut recipes);
    debug!(count = recipes.len(), "Parsed recipe catalog");
    Ok(recipes)
}

/// Encode a catalog into the document shape [`parse_catalog`] reads.
pub fn encode_catalog(recipes: &[Recipe]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(recipes)
}

/// Ordinal, case-sensitive ordering by name.
pub fn sort_by_name(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| a.name.cmp(&b.name));
}

fn parse_recipe(index: usize, record: &Value) -> Result<Recipe, ParseError> {
    if !record.is_object() {
        return Err(ParseError::InvalidRecord { index });
    }

    let name = string_value(record.get("name"));

    let ingredients = elements(record.get("ingredients"))
        .into_iter()
        .map(|ingredient| parse_ingredient(&name, ingredient))
        .collect::<Result<Vec<_>, _>>()?;

    let steps: Vec<String> = elements(record.get("steps"))
        .into_iter()
        .map(|step| string_value(Some(step)))
        .collect();

    let timers: Vec<u32> = elements(record.get("timers"))
        .into_iter()
        .map(timer_value)
        .collect();

    if steps.len() != timers.len() {
        warn!(recipe = %name, steps = steps.len(), timers = timers.len(), "Steps and timers differ");
        return Err(ParseError::StepTimerMismatch {
            recipe: name,
            steps: steps.len(),
            timers: timers.len(),
        });
    }

    Ok(Recipe {
        image_url: url_value(record.get("imageURL")),
        original_url: url_value(record.get("originalURL")),
        name,
        ingredients,
        steps,
        timers,
    })
}

fn parse_ingredient(recipe: &str, value: &Value) -> Result<Ingredient, ParseError> {
    let tag = string_value(value.get("type"));
    let kind = tag.parse::<IngredientType>().map_err(|_| {
        warn!(recipe = %recipe, tag = %tag, "Invalid ingredient type");
        ParseError::UnknownIngredientType {
            recipe: recipe.to_string(),
            value: tag.clone(),
        }
    })?;

    Ok(Ingredient {
        quantity: string_value(value.get("quantity")),
        name: string_value(value.get("name")),
        kind,
    })
}

/// Children of an array, or values of an object; nothing for scalars.
fn elements(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(map)) => map.values().collect(),
        _ => Vec::new(),
    }
}

fn string_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn timer_value(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(|m| m.min(u32::MAX as u64) as u32)
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u32))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| *f >= 0.0).map(|f| f as u32))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn url_value(value: Option<&Value>) -> Option<Url> {
    let raw = string_value(value);
    if raw.is_empty() {
        return None;
    }
    Url::parse(&raw).ok()
}
