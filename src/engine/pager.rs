// ABOUTME: Recipe pager holding one search batch and a cyclic cursor into it
// ABOUTME: Search queries once, skip walks the cached batch, clear resets everything
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Recipe Pager
//!
//! | Action | Effect |
//! |--------|--------|
//! | `Search` | one upstream query, cursor back to 0, visible when non-empty |
//! | `Skip` | next recipe of the cached batch, wrapping to 0; no query |
//! | `Clear` | hidden, batch dropped, cursor 0, selection cleared |
//!
//! Every action is a no-op while the selection is empty. A failed search
//! hides the view but keeps the previous batch and cursor, so a later skip
//! can still walk it.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::triggers::PagerAction;
use crate::errors::{AppError, ErrorResponseDetails};
use crate::models::{Recipe, RecipeBatch, RecipeCursor, SelectedIngredients};
use larder_providers::RecipeApi;

/// Pager memory kept by a session between actions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PagerState {
    /// Cached search result
    pub batch: Option<RecipeBatch>,
    /// Position of the displayed recipe
    pub cursor: RecipeCursor,
    /// Whether a recipe is displayed
    pub visible: bool,
}

impl PagerState {
    /// Recipe to display, if any
    #[must_use]
    pub fn current(&self) -> Option<&Recipe> {
        if !self.visible {
            return None;
        }
        self.batch.as_ref().and_then(|batch| batch.get(self.cursor))
    }

    /// Number of cached recipes
    #[must_use]
    pub fn batch_len(&self) -> usize {
        self.batch.as_ref().map_or(0, RecipeBatch::len)
    }
}

/// Result of one pager action
#[derive(Debug, Clone, PartialEq)]
pub struct PagerStep {
    /// State after the action
    pub state: PagerState,
    /// Whether the caller must empty the ingredient selection
    pub clear_selection: bool,
    /// Failure behind an empty result
    pub error: Option<ErrorResponseDetails>,
}

/// Fetches and walks recipe batches
pub struct RecipePager {
    api: Arc<dyn RecipeApi>,
    batch_size: u32,
}

impl RecipePager {
    /// Pager fetching `batch_size` recipes per search
    #[must_use]
    pub fn new(api: Arc<dyn RecipeApi>, batch_size: u32) -> Self {
        Self { api, batch_size }
    }

    /// Apply `action`; `None` means nothing changes
    pub async fn advance(
        &self,
        action: PagerAction,
        selected: &SelectedIngredients,
        state: &PagerState,
    ) -> Option<PagerStep> {
        if selected.is_empty() {
            return None;
        }

        match action {
            PagerAction::Clear => Some(PagerStep {
                state: PagerState::default(),
                clear_selection: true,
                error: None,
            }),
            PagerAction::Skip => {
                let batch = state.batch.as_ref().filter(|batch| !batch.is_empty())?;
                Some(PagerStep {
                    state: PagerState {
                        batch: Some(batch.clone()),
                        cursor: state.cursor.advanced(batch.len()),
                        visible: true,
                    },
                    clear_selection: false,
                    error: None,
                })
            }
            PagerAction::Search => Some(self.search(selected, state).await),
        }
    }

    async fn search(&self, selected: &SelectedIngredients, state: &PagerState) -> PagerStep {
        match self
            .api
            .find_by_ingredients(selected, self.batch_size)
            .await
        {
            Ok(recipes) => {
                let batch = self.consistent_batch(recipes);
                info!(
                    ingredients = %selected.query_value(),
                    results = batch.len(),
                    "Recipe search completed"
                );
                if batch.is_empty() {
                    PagerStep {
                        state: PagerState::default(),
                        clear_selection: false,
                        error: None,
                    }
                } else {
                    PagerStep {
                        state: PagerState {
                            batch: Some(batch),
                            cursor: RecipeCursor::default(),
                            visible: true,
                        },
                        clear_selection: false,
                        error: None,
                    }
                }
            }
            Err(e) => {
                warn!(ingredients = %selected.query_value(), error = %e, "Recipe search failed");
                let error = AppError::from(e);
                PagerStep {
                    state: PagerState {
                        visible: false,
                        ..state.clone()
                    },
                    clear_selection: false,
                    error: Some(ErrorResponseDetails::from(&error)),
                }
            }
        }
    }

    /// Cap the result at the batch size and drop records whose used and missed
    /// ingredients overlap
    fn consistent_batch(&self, recipes: Vec<Recipe>) -> RecipeBatch {
        RecipeBatch::new(
            recipes
                .into_iter()
                .filter(|recipe| match recipe.validate_partition() {
                    Ok(()) => true,
                    Err(reason) => {
                        warn!(recipe.id = recipe.id, %reason, "Dropping inconsistent recipe");
                        false
                    }
                })
                .take(self.batch_size as usize)
                .collect(),
        )
    }
}
