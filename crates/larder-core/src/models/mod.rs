// ABOUTME: Domain models for ingredients, recipes, pagination cursor and the shopping cart
// ABOUTME: Typed records validated at the upstream API boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Core data models
//!
//! Upstream JSON is decoded straight into these records, so a missing or
//! mistyped field surfaces as a decode error instead of a field-access fault.

mod cart;
mod ingredient;
mod recipe;

pub use cart::{Cart, CartRow, CartTable};
pub use ingredient::{title_case, IngredientRef, IngredientSuggestion, SelectedIngredients};
pub use recipe::{
    InstructionBlock, InstructionStep, Recipe, RecipeBatch, RecipeCursor, RecipeDetail,
};

use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default value
///
/// The upstream API sends `"aisle": null` and `"unit": null` for some items.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
