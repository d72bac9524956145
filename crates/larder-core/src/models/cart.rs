// ABOUTME: Shopping cart record and its read-only table projection types
// ABOUTME: The cart is restored from an untyped client-side blob and validated on load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::IngredientRef;
use crate::constants::labels::CART_COLUMNS;

/// Priced missing ingredients accumulated across saves, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<IngredientRef>);

impl Cart {
    /// Cart holding `items`
    #[must_use]
    pub const fn new(items: Vec<IngredientRef>) -> Self {
        Self(items)
    }

    /// Restore a cart from its persisted, untyped form
    ///
    /// `null`, an empty string and an empty array all mean "no cart".
    ///
    /// # Errors
    ///
    /// Returns the decode error when the blob is neither empty nor a list of ingredients.
    pub fn from_blob(blob: Value) -> Result<Self, serde_json::Error> {
        match blob {
            Value::Null => Ok(Self::default()),
            Value::String(text) if text.trim().is_empty() => Ok(Self::default()),
            other => serde_json::from_value(other),
        }
    }

    /// Persistable form of the cart
    #[must_use]
    pub fn to_blob(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .filter_map(|item| serde_json::to_value(item).ok())
                .collect(),
        )
    }

    /// Items in insertion order
    #[must_use]
    pub fn items(&self) -> &[IngredientRef] {
        &self.0
    }

    /// Whether the cart holds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of line items
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Append items after the existing entries; no dedup
    pub fn extend(&mut self, items: impl IntoIterator<Item = IngredientRef>) {
        self.0.extend(items);
    }
}

/// One displayed cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRow {
    /// Ingredient name, or "Total" on the summary row
    pub name: String,
    /// Aisle, blank on the summary row
    pub aisle: String,
    /// Estimated cost
    pub cost: f64,
}

/// Read-only tabular projection of a cart with a trailing total row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTable {
    /// Column names in display order
    pub columns: Vec<String>,
    /// One row per cart item
    pub rows: Vec<CartRow>,
    /// Synthetic summary row
    pub total: CartRow,
}

impl CartTable {
    /// Build a table from item rows and their summary row
    #[must_use]
    pub fn new(rows: Vec<CartRow>, total: CartRow) -> Self {
        Self {
            columns: CART_COLUMNS.iter().map(|column| (*column).to_owned()).collect(),
            rows,
            total,
        }
    }

    /// Item rows followed by the total row
    pub fn rows_with_total(&self) -> impl Iterator<Item = &CartRow> {
        self.rows.iter().chain(std::iter::once(&self.total))
    }
}
