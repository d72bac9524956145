// ABOUTME: Core provider trait for the upstream food-data service
// ABOUTME: Narrow request/response contract used by every engine component
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe API contract
//!
//! Four calls cover everything the engine needs from the upstream service:
//!
//! | Call | Used by |
//! |------|---------|
//! | `autocomplete_ingredients` | ingredient lookup |
//! | `find_by_ingredients` | recipe pager |
//! | `analyzed_instructions` | detail assembler |
//! | `estimated_cost` | cart accumulator |
//!
//! Every call returns a [`ProviderResult`], distinguishing a rejected API key
//! from transport failures, other HTTP errors and undecodable bodies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderResult;
use crate::models::{IngredientRef, InstructionBlock, Recipe, SelectedIngredients};

/// One autocomplete hit from the upstream service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteEntry {
    /// Ingredient name
    pub name: String,
    /// Ingredient image file name, when provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Upstream food-data service
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Ingredient names matching partial input, at most `limit`
    async fn autocomplete_ingredients(
        &self,
        query: &str,
        limit: u32,
    ) -> ProviderResult<Vec<AutocompleteEntry>>;

    /// Recipes ranked by how well they use `ingredients`, at most `limit`
    async fn find_by_ingredients(
        &self,
        ingredients: &SelectedIngredients,
        limit: u32,
    ) -> ProviderResult<Vec<Recipe>>;

    /// Step-by-step instructions for a recipe; may be empty
    async fn analyzed_instructions(&self, recipe_id: u64) -> ProviderResult<Vec<InstructionBlock>>;

    /// Estimated cost of `ingredient.amount` of the ingredient
    async fn estimated_cost(&self, ingredient: &IngredientRef) -> ProviderResult<f64>;
}
