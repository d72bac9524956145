// ABOUTME: Scripted in-memory RecipeApi for engine, session and route tests
// ABOUTME: Answers are configured per call kind, calls are counted and logged in order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code)]

use async_trait::async_trait;
use larder::models::{
    IngredientRef, InstructionBlock, InstructionStep, Recipe, SelectedIngredients,
};
use larder_providers::{AutocompleteEntry, ProviderError, ProviderResult, RecipeApi};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Default price answered for ingredients without a scripted price
pub const DEFAULT_PRICE: f64 = 0.5;

/// Recipe API double with scripted answers
pub struct MockRecipeApi {
    autocomplete: Mutex<ProviderResult<Vec<AutocompleteEntry>>>,
    search: Mutex<ProviderResult<Vec<Recipe>>>,
    instructions: Mutex<HashMap<u64, ProviderResult<Vec<InstructionBlock>>>>,
    prices: Mutex<HashMap<u64, ProviderResult<f64>>>,
    calls: Mutex<Vec<String>>,
    search_calls: AtomicUsize,
    price_calls: AtomicUsize,
    search_delay: Option<Duration>,
}

impl Default for MockRecipeApi {
    fn default() -> Self {
        Self {
            autocomplete: Mutex::new(Ok(Vec::new())),
            search: Mutex::new(Ok(Vec::new())),
            instructions: Mutex::new(HashMap::new()),
            prices: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            search_calls: AtomicUsize::new(0),
            price_calls: AtomicUsize::new(0),
            search_delay: None,
        }
    }
}

impl MockRecipeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_autocomplete(self, names: &[&str]) -> Self {
        self.set_autocomplete(Ok(names
            .iter()
            .map(|name| AutocompleteEntry {
                name: (*name).to_owned(),
                image: None,
            })
            .collect()));
        self
    }

    pub fn with_recipes(self, recipes: Vec<Recipe>) -> Self {
        self.set_search(Ok(recipes));
        self
    }

    /// Hold every recipe search for `delay` before answering
    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = Some(delay);
        self
    }

    pub fn with_steps(self, recipe_id: u64, steps: &[&str]) -> Self {
        self.instructions
            .lock()
            .unwrap()
            .insert(recipe_id, Ok(vec![block(steps)]));
        self
    }

    pub fn with_instructions(self, recipe_id: u64, result: ProviderResult<Vec<InstructionBlock>>) -> Self {
        self.instructions.lock().unwrap().insert(recipe_id, result);
        self
    }

    pub fn with_price(self, ingredient_id: u64, result: ProviderResult<f64>) -> Self {
        self.prices.lock().unwrap().insert(ingredient_id, result);
        self
    }

    pub fn set_autocomplete(&self, result: ProviderResult<Vec<AutocompleteEntry>>) {
        *self.autocomplete.lock().unwrap() = result;
    }

    pub fn set_search(&self, result: ProviderResult<Vec<Recipe>>) {
        *self.search.lock().unwrap() = result;
    }

    /// Calls in the order they were made, e.g. `search:flour`, `instructions:7`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn price_calls(&self) -> usize {
        self.price_calls.load(Ordering::SeqCst)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RecipeApi for MockRecipeApi {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn autocomplete_ingredients(
        &self,
        query: &str,
        limit: u32,
    ) -> ProviderResult<Vec<AutocompleteEntry>> {
        self.record(format!("autocomplete:{query}"));
        self.autocomplete
            .lock()
            .unwrap()
            .clone()
            .map(|entries| entries.into_iter().take(limit as usize).collect())
    }

    async fn find_by_ingredients(
        &self,
        ingredients: &SelectedIngredients,
        _limit: u32,
    ) -> ProviderResult<Vec<Recipe>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.record(format!("search:{}", ingredients.query_value()));
        if let Some(delay) = self.search_delay {
            tokio::time::sleep(delay).await;
        }
        self.search.lock().unwrap().clone()
    }

    async fn analyzed_instructions(&self, recipe_id: u64) -> ProviderResult<Vec<InstructionBlock>> {
        self.record(format!("instructions:{recipe_id}"));
        self.instructions
            .lock()
            .unwrap()
            .get(&recipe_id)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn estimated_cost(&self, ingredient: &IngredientRef) -> ProviderResult<f64> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        self.record(format!("price:{}", ingredient.id));
        self.prices
            .lock()
            .unwrap()
            .get(&ingredient.id)
            .cloned()
            .unwrap_or(Ok(DEFAULT_PRICE))
    }
}

/// Instruction block holding `steps` in order
pub fn block(steps: &[&str]) -> InstructionBlock {
    InstructionBlock {
        name: String::new(),
        steps: steps
            .iter()
            .enumerate()
            .map(|(index, step)| InstructionStep {
                number: index as u32 + 1,
                step: (*step).to_owned(),
            })
            .collect(),
    }
}

/// Ingredient record with an image derived from its name
pub fn ingredient(id: u64, name: &str, aisle: &str, amount: f64) -> IngredientRef {
    IngredientRef {
        id,
        name: name.to_owned(),
        aisle: aisle.to_owned(),
        amount,
        unit: "cups".to_owned(),
        image: Some(format!(
            "https://img.spoonacular.com/ingredients_100x100/{}.jpg",
            name.replace(' ', "-")
        )),
        cost: None,
    }
}

/// Recipe using `used` and missing `missed`
pub fn recipe(id: u64, title: &str, used: Vec<IngredientRef>, missed: Vec<IngredientRef>) -> Recipe {
    Recipe {
        id,
        title: title.to_owned(),
        image_url: format!("https://img.spoonacular.com/recipes/{id}-312x231.jpg"),
        missed_ingredient_count: missed.len() as u32,
        used_ingredients: used,
        missed_ingredients: missed,
    }
}

/// `count` recipes with ids `1..=count`, each missing one ingredient
pub fn recipe_batch(count: u64) -> Vec<Recipe> {
    (1..=count)
        .map(|id| {
            recipe(
                id,
                &format!("Recipe {id}"),
                vec![ingredient(1000 + id, "flour", "Baking", 2.0)],
                vec![ingredient(2000 + id, "butter", "Milk, Eggs, Other Dairy", 0.5)],
            )
        })
        .collect()
}

pub fn transport_error() -> ProviderError {
    ProviderError::NetworkError("connection reset by peer".to_owned())
}

pub fn unauthorized() -> ProviderError {
    ProviderError::Unauthorized {
        provider: "mock".to_owned(),
    }
}

pub fn parse_error() -> ProviderError {
    ProviderError::ParseError {
        provider: "mock".to_owned(),
        reason: "expected a sequence".to_owned(),
    }
}
