use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// Grocery category for an ingredient.
///
/// The lowercase tags returned by [`IngredientType::as_str`] are the
/// contract for both the bundled and the remote catalog document: tags are
/// matched exactly, and a document using any other tag (including a
/// capitalised one) fails to load as a whole rather than mapping to a
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientType {
    Produce,
    Meat,
    Seafood,
    Dairy,
    Bakery,
    Dry,
    Spices,
    Condiments,
    Frozen,
    Other,
}

impl IngredientType {
    pub const ALL: [IngredientType; 10] = [
        IngredientType::Produce,
        IngredientType::Meat,
        IngredientType::Seafood,
        IngredientType::Dairy,
        IngredientType::Bakery,
        IngredientType::Dry,
        IngredientType::Spices,
        IngredientType::Condiments,
        IngredientType::Frozen,
        IngredientType::Other,
    ];

    /// Wire tag as it appears in the catalog document.
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientType::Produce => "produce",
            IngredientType::Meat => "meat",
            IngredientType::Seafood => "seafood",
            IngredientType::Dairy => "dairy",
            IngredientType::Bakery => "bakery",
            IngredientType::Dry => "dry",
            IngredientType::Spices => "spices",
            IngredientType::Condiments => "condiments",
            IngredientType::Frozen => "frozen",
            IngredientType::Other => "other",
        }
    }

    /// Get the display name for this category.
    pub fn display_name(&self) -> &'static str {
        match self {
            IngredientType::Produce => "Produce",
            IngredientType::Meat => "Meat",
            IngredientType::Seafood => "Seafood",
            IngredientType::Dairy => "Dairy",
            IngredientType::Bakery => "Bakery",
            IngredientType::Dry => "Dry Goods",
            IngredientType::Spices => "Spices",
            IngredientType::Condiments => "Condiments",
            IngredientType::Frozen => "Frozen",
            IngredientType::Other => "Other",
        }
    }
}

impl fmt::Display for IngredientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returned when a tag does not name any [`IngredientType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIngredientType(pub String);

impl FromStr for IngredientType {
    type Err = UnknownIngredientType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownIngredientType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    /// Free-form amount, e.g. "2 cups".
    pub quantity: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: IngredientType,
}

impl Ingredient {
    pub fn display_line(&self) -> String {
        if self.quantity.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.quantity, self.name)
        }
    }
}

/// A recipe from the catalog.
///
/// `steps` and `timers` always have the same length; the parser refuses
/// documents that break this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    /// Minutes per step, 0 meaning the step has no timer.
    pub timers: Vec<u32>,
    #[serde(rename = "imageURL")]
    pub image_url: Option<Url>,
    #[serde(rename = "originalURL")]
    pub original_url: Option<Url>,
}

impl Recipe {
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    /// Sum of all step timers, saturating at `u32::MAX`.
    pub fn total_timer_minutes(&self) -> u32 {
        self.timers.iter().fold(0u32, |total, &m| total.saturating_add(m))
    }

    /// Iterate each step together with its timer.
    pub fn steps_with_timers(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.steps
            .iter()
            .map(String::as_str)
            .zip(self.timers.iter().copied())
    }

    /// Timer for a step, `None` when the step has no timer or does not exist.
    pub fn timer_for_step(&self, index: usize) -> Option<u32> {
        self.timers.get(index).copied().filter(|&m| m > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pancakes() -> Recipe {
        Recipe {
            name: "Pancakes".to_string(),
            ingredients: vec![Ingredient {
                quantity: "2 cups".to_string(),
                name: "flour".to_string(),
                kind: IngredientType::Dry,
            }],
            steps: vec!["Mix".to_string(), "Rest".to_string(), "Fry".to_string()],
            timers: vec![0, 10, 3],
            image_url: None,
            original_url: None,
        }
    }

    #[test]
    fn test_ingredient_type_from_str() {
        assert_eq!("produce".parse::<IngredientType>(), Ok(IngredientType::Produce));
        assert_eq!("spices".parse::<IngredientType>(), Ok(IngredientType::Spices));
        assert_eq!(
            "unobtainium".parse::<IngredientType>(),
            Err(UnknownIngredientType("unobtainium".to_string()))
        );
        // Tags are matched exactly
        assert!("Produce".parse::<IngredientType>().is_err());
        assert!("".parse::<IngredientType>().is_err());
    }

    #[test]
    fn test_ingredient_type_round_trips_through_tag() {
        for kind in IngredientType::ALL {
            assert_eq!(kind.as_str().parse::<IngredientType>(), Ok(kind));
        }
    }

    #[test]
    fn test_timer_helpers() {
        let recipe = pancakes();
        assert_eq!(recipe.total_timer_minutes(), 13);
        assert_eq!(recipe.timer_for_step(0), None);
        assert_eq!(recipe.timer_for_step(1), Some(10));
        assert_eq!(recipe.timer_for_step(9), None);

        let pairs: Vec<_> = recipe.steps_with_timers().collect();
        assert_eq!(pairs, vec![("Mix", 0), ("Rest", 10), ("Fry", 3)]);
    }

    #[test]
    fn test_total_timer_minutes_saturates() {
        let mut recipe = pancakes();
        recipe.steps = vec!["Wait".to_string(), "Serve".to_string()];
        recipe.timers = vec![u32::MAX, 5];
        assert_eq!(recipe.total_timer_minutes(), u32::MAX);
    }

    #[test]
    fn test_ingredient_display_line() {
        let recipe = pancakes();
        assert_eq!(recipe.ingredients[0].display_line(), "2 cups flour");

        let salt = Ingredient {
            quantity: String::new(),
            name: "salt".to_string(),
            kind: IngredientType::Spices,
        };
        assert_eq!(salt.display_line(), "salt");
    }
}
