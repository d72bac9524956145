// ABOUTME: Recipe detail assembler building the display bundle for the recipe under the cursor
// ABOUTME: Instruction failures degrade to an empty step list instead of failing the display
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::{AppError, ErrorResponseDetails};
use crate::models::{Recipe, RecipeDetail};
use larder_providers::RecipeApi;

/// Label of the save-to-cart action for a recipe missing `missed_count` ingredients
#[must_use]
pub fn save_button_label(missed_count: u32) -> String {
    format!("Save {missed_count} Missing ingredients to cart")
}

/// Detail bundle plus the instruction failure, if any
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledDetail {
    /// Display bundle
    pub detail: RecipeDetail,
    /// Why `detail.steps` is empty, when the instruction call failed
    pub warning: Option<ErrorResponseDetails>,
}

/// Builds [`RecipeDetail`] records
pub struct DetailAssembler {
    api: Arc<dyn RecipeApi>,
}

impl DetailAssembler {
    /// Assembler fetching instructions through `api`
    #[must_use]
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        Self { api }
    }

    /// Assemble the bundle for `recipe`; never fails
    pub async fn assemble(&self, recipe: &Recipe) -> AssembledDetail {
        let (steps, warning) = match self.api.analyzed_instructions(recipe.id).await {
            // Only the first instruction block is shown
            Ok(blocks) => {
                let steps: Vec<String> = blocks
                    .into_iter()
                    .next()
                    .map(|block| block.steps.into_iter().map(|step| step.step).collect())
                    .unwrap_or_default();
                if steps.is_empty() {
                    debug!(recipe.id = recipe.id, "Recipe has no analyzed instructions");
                }
                (steps, None)
            }
            Err(e) => {
                warn!(recipe.id = recipe.id, error = %e, "Instructions unavailable");
                let error = AppError::from(e);
                (Vec::new(), Some(ErrorResponseDetails::from(&error)))
            }
        };

        AssembledDetail {
            detail: RecipeDetail {
                recipe_id: recipe.id,
                title: recipe.title.clone(),
                image_url: recipe.image_url.clone(),
                used_ingredient_images: recipe
                    .used_ingredients
                    .iter()
                    .filter_map(|ingredient| ingredient.image.clone())
                    .collect(),
                steps,
                missing_ingredients: recipe.missed_ingredients.clone(),
                save_button_label: save_button_label(recipe.missed_ingredient_count),
            },
            warning,
        }
    }
}
