// ABOUTME: Recipe discovery engine bundling lookup, pager, detail assembler and cart accumulator
// ABOUTME: All four components share one recipe API handle
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Engine
//!
//! Data flows one way per user action: lookup, then pager, then detail,
//! then cart. Components hold no session state; callers pass it in and get
//! the next state back.

/// Cart accumulator and table projection
pub mod cart;
/// Recipe detail assembler
pub mod detail;
/// Ingredient lookup
pub mod lookup;
/// Recipe pager
pub mod pager;
/// Session phase machine
pub mod state;
/// Trigger timestamps and resolution
pub mod triggers;

pub use cart::{make_cart, merge_cart, CartAccumulator, CartView, PricingFailure};
pub use detail::{save_button_label, AssembledDetail, DetailAssembler};
pub use lookup::{filter_suggestions, IngredientLookup, Lookup};
pub use pager::{PagerState, PagerStep, RecipePager};
pub use state::{transition, Phase, SessionEvent, UserAction};
pub use triggers::{CartAction, CartTriggers, PagerAction, PagerTriggers, TriggerClock};

use std::sync::Arc;

use crate::config::EngineSettings;
use larder_providers::RecipeApi;

/// The four engine components
pub struct Engine {
    /// Ingredient lookup
    pub lookup: IngredientLookup,
    /// Recipe pager
    pub pager: RecipePager,
    /// Recipe detail assembler
    pub detail: DetailAssembler,
    /// Cart accumulator
    pub cart: CartAccumulator,
}

impl Engine {
    /// Engine over `api` with the given result sizes
    #[must_use]
    pub fn new(api: Arc<dyn RecipeApi>, settings: EngineSettings) -> Self {
        tracing::debug!(
            provider = api.name(),
            batch_size = settings.recipe_batch_size,
            autocomplete_limit = settings.autocomplete_limit,
            "Engine created"
        );
        Self {
            lookup: IngredientLookup::new(Arc::clone(&api), settings.autocomplete_limit),
            pager: RecipePager::new(Arc::clone(&api), settings.recipe_batch_size),
            detail: DetailAssembler::new(Arc::clone(&api)),
            cart: CartAccumulator::new(api),
        }
    }
}
