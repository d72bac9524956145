// ABOUTME: Ingredient records, autocomplete suggestions and the ordered selection set
// ABOUTME: Includes the title-casing rule used for suggestion labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Ingredient as referenced by a recipe, optionally priced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRef {
    /// Upstream ingredient id
    pub id: u64,
    /// Ingredient name
    pub name: String,
    /// Supermarket aisle
    #[serde(default, deserialize_with = "null_as_default")]
    pub aisle: String,
    /// Quantity the recipe calls for
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    /// Unit of `amount`
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    /// Ingredient image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Estimated cost, attached when the ingredient is saved to the cart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl IngredientRef {
    /// Copy of this ingredient with `cost` attached
    #[must_use]
    pub fn priced(&self, cost: f64) -> Self {
        Self {
            cost: Some(cost),
            ..self.clone()
        }
    }

    /// Cost used for totals; unpriced ingredients count as zero
    #[must_use]
    pub fn cost_or_zero(&self) -> f64 {
        self.cost.unwrap_or(0.0)
    }
}

/// One autocomplete option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientSuggestion {
    /// Value selected when the option is picked
    pub name: String,
    /// Label shown to the user
    pub display_label: String,
}

impl IngredientSuggestion {
    /// Suggestion returned by the upstream service; the label is title-cased
    #[must_use]
    pub fn from_server(name: impl Into<String>) -> Self {
        let name = name.into();
        let display_label = title_case(&name);
        Self {
            name,
            display_label,
        }
    }

    /// Suggestion for a value the user already picked; label is the raw value
    #[must_use]
    pub fn from_selection(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_label: name.clone(),
            name,
        }
    }
}

/// Ordered set of ingredient names picked by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedIngredients(Vec<String>);

impl SelectedIngredients {
    /// Empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a name; returns false when blank or already selected
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.0.push(name.to_owned());
        true
    }

    /// Remove a name; returns whether it was present
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|selected| selected != name.trim());
        before != self.0.len()
    }

    /// Membership check on the raw value
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|selected| selected == name)
    }

    /// Drop every selection
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected names
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Names in selection order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Comma-joined form sent to the recipe search
    #[must_use]
    pub fn query_value(&self) -> String {
        self.0.join(",")
    }
}

impl<S: Into<String>> FromIterator<S> for SelectedIngredients {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selected = Self::new();
        for name in iter {
            selected.insert(name);
        }
        selected
    }
}

/// Title-case a string: first letter of every alphabetic run upper-cased, the rest lower-cased
///
/// `"bread flour"` becomes `"Bread Flour"`, `"o'brien"` becomes `"O'Brien"`.
#[must_use]
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_alphabetic = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if previous_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            out.push(ch);
            previous_alphabetic = false;
        }
    }
    out
}
