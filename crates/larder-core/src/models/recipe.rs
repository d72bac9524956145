// ABOUTME: Recipe records, the cached search batch, the cyclic cursor and the display bundle
// ABOUTME: Also holds the analyzed-instruction records returned by the upstream API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{null_as_default, IngredientRef};

/// Candidate recipe returned by a search by ingredients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Upstream recipe id
    pub id: u64,
    /// Recipe title
    pub title: String,
    /// Recipe image URL
    #[serde(rename = "image", default, deserialize_with = "null_as_default")]
    pub image_url: String,
    /// Ingredients the user already has
    #[serde(default)]
    pub used_ingredients: Vec<IngredientRef>,
    /// Ingredients the user is missing
    #[serde(default)]
    pub missed_ingredients: Vec<IngredientRef>,
    /// Count of missing ingredients as reported upstream
    #[serde(default)]
    pub missed_ingredient_count: u32,
}

impl Recipe {
    /// Check that no ingredient id is both used and missed
    ///
    /// # Errors
    ///
    /// Returns a description of the first overlapping ingredient.
    pub fn validate_partition(&self) -> Result<(), String> {
        self.missed_ingredients
            .iter()
            .find(|missed| {
                self.used_ingredients
                    .iter()
                    .any(|used| used.id == missed.id)
            })
            .map_or(Ok(()), |overlap| {
                Err(format!(
                    "recipe {} lists ingredient {} ({}) as both used and missed",
                    self.id, overlap.id, overlap.name
                ))
            })
    }
}

/// Recipes returned by one search, in upstream ranking order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeBatch(Vec<Recipe>);

impl RecipeBatch {
    /// Wrap a search result
    #[must_use]
    pub const fn new(recipes: Vec<Recipe>) -> Self {
        Self(recipes)
    }

    /// Number of recipes in the batch
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the search returned nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recipe at the cursor position
    #[must_use]
    pub fn get(&self, cursor: RecipeCursor) -> Option<&Recipe> {
        self.0.get(cursor.index())
    }

    /// Recipes in order
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.0
    }
}

/// Index of the displayed recipe within the cached batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeCursor(usize);

impl RecipeCursor {
    /// Cursor at `index`
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self(index)
    }

    /// Current index
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Next position in a batch of `batch_len`; wraps to 0 after the last index
    #[must_use]
    pub const fn advanced(self, batch_len: usize) -> Self {
        if self.0 + 1 >= batch_len {
            Self(0)
        } else {
            Self(self.0 + 1)
        }
    }
}

/// One analyzed instruction step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStep {
    /// Step number within its block
    #[serde(default)]
    pub number: u32,
    /// Step text
    #[serde(default, deserialize_with = "null_as_default")]
    pub step: String,
}

/// Block of analyzed instructions (a recipe may have several named parts)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionBlock {
    /// Block name, often empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Ordered steps
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

/// Display-ready bundle for the recipe under the cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    /// Recipe id
    pub recipe_id: u64,
    /// Recipe title
    pub title: String,
    /// Recipe image URL
    pub image_url: String,
    /// Images of the ingredients the user already has
    pub used_ingredient_images: Vec<String>,
    /// Ordered instruction steps; empty when unavailable
    pub steps: Vec<String>,
    /// Ingredients the user is missing
    pub missing_ingredients: Vec<IngredientRef>,
    /// Label for the save-to-cart action
    pub save_button_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIND_BY_INGREDIENTS_ITEM: &str = r#"{
        "id": 641803,
        "title": "Easy & Delish! ~ Apple Crumble ~",
        "image": "https://img.spoonacular.com/recipes/641803-312x231.jpg",
        "imageType": "jpg",
        "likes": 1,
        "missedIngredientCount": 1,
        "usedIngredientCount": 1,
        "missedIngredients": [
            {"id": 1001, "amount": 0.5, "unit": "cup", "name": "butter", "aisle": "Milk, Eggs, Other Dairy",
             "image": "https://img.spoonacular.com/ingredients_100x100/butter-sliced.jpg"}
        ],
        "usedIngredients": [
            {"id": 9003, "amount": 6.0, "unit": "large", "name": "apples", "aisle": "Produce",
             "image": "https://img.spoonacular.com/ingredients_100x100/apple.jpg"}
        ],
        "unusedIngredients": []
    }"#;

    #[test]
    fn test_recipe_decodes_upstream_shape() {
        let recipe: Recipe = serde_json::from_str(FIND_BY_INGREDIENTS_ITEM).unwrap();
        assert_eq!(recipe.id, 641_803);
        assert_eq!(recipe.missed_ingredient_count, 1);
        assert_eq!(recipe.used_ingredients[0].name, "apples");
        assert_eq!(recipe.missed_ingredients[0].unit, "cup");
        assert!(recipe.image_url.ends_with(".jpg"));
        assert!(recipe.validate_partition().is_ok());
    }

    #[test]
    fn test_partition_violation_detected() {
        let mut recipe: Recipe = serde_json::from_str(FIND_BY_INGREDIENTS_ITEM).unwrap();
        let used = recipe.used_ingredients[0].clone();
        recipe.missed_ingredients.push(used);
        assert!(recipe.validate_partition().is_err());
    }

    #[test]
    fn test_cursor_wraps_after_last_index() {
        assert_eq!(RecipeCursor::at(0).advanced(30), RecipeCursor::at(1));
        assert_eq!(RecipeCursor::at(28).advanced(30), RecipeCursor::at(29));
        assert_eq!(RecipeCursor::at(29).advanced(30), RecipeCursor::at(0));
        assert_eq!(RecipeCursor::at(0).advanced(1), RecipeCursor::at(0));
        assert_eq!(RecipeCursor::at(3).advanced(0), RecipeCursor::at(0));
    }
}
