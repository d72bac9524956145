// ABOUTME: Ingredient lookup turning partial text into suggestion options
// ABOUTME: Server suggestions are merged with the current selection so picked values never vanish
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::{AppError, ErrorResponseDetails};
use crate::models::{title_case, IngredientSuggestion, SelectedIngredients};
use larder_providers::RecipeApi;

/// Suggestions for one lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookup {
    /// Options to display, server hits first
    pub suggestions: Vec<IngredientSuggestion>,
    /// Set when the autocomplete call failed and only selections are offered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ErrorResponseDetails>,
}

/// Autocomplete against the recipe API
pub struct IngredientLookup {
    api: Arc<dyn RecipeApi>,
    limit: u32,
}

impl IngredientLookup {
    /// Lookup capped at `limit` server suggestions
    #[must_use]
    pub fn new(api: Arc<dyn RecipeApi>, limit: u32) -> Self {
        Self { api, limit }
    }

    /// Suggestions for `search_text`
    ///
    /// Returns `None` for blank input, meaning "leave the options as they are".
    /// Surrounding whitespace is ignored for both the request and the filter.
    /// An upstream failure still yields the current selection, with the error
    /// attached as a warning.
    pub async fn suggest(
        &self,
        search_text: &str,
        selected: &SelectedIngredients,
    ) -> Option<Lookup> {
        let search_text = search_text.trim();
        if search_text.is_empty() {
            return None;
        }

        match self
            .api
            .autocomplete_ingredients(search_text, self.limit)
            .await
        {
            Ok(entries) => {
                debug!(
                    query = search_text,
                    hits = entries.len(),
                    "Autocomplete answered"
                );
                Some(Lookup {
                    suggestions: filter_suggestions(
                        search_text,
                        entries.into_iter().map(|entry| entry.name),
                        selected,
                    ),
                    warning: None,
                })
            }
            Err(e) => {
                warn!(query = search_text, error = %e, "Autocomplete failed, offering selections only");
                let error = AppError::from(e);
                Some(Lookup {
                    suggestions: filter_suggestions(search_text, std::iter::empty(), selected),
                    warning: Some(ErrorResponseDetails::from(&error)),
                })
            }
        }
    }
}

/// Merge server names with the selection and keep the relevant options
///
/// A candidate survives when its label contains the title-cased search text
/// or its value is already selected. Values appear once, first occurrence wins.
#[must_use]
pub fn filter_suggestions(
    search_text: &str,
    server_names: impl IntoIterator<Item = String>,
    selected: &SelectedIngredients,
) -> Vec<IngredientSuggestion> {
    let needle = title_case(search_text);
    let mut seen = HashSet::new();

    server_names
        .into_iter()
        .map(IngredientSuggestion::from_server)
        .chain(selected.iter().map(IngredientSuggestion::from_selection))
        .filter(|candidate| {
            candidate.display_label.contains(&needle) || selected.contains(&candidate.name)
        })
        .filter(|candidate| seen.insert(candidate.name.clone()))
        .collect()
}
