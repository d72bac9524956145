// ABOUTME: One recipe discovery session: selection, pager memory, displayed detail and cart
// ABOUTME: Resolves trigger sets, drives the engine and tracks the session phase
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Session
//!
//! A [`Session`] owns everything one user sees. Mutating methods take
//! `&mut self`, so actions on one session are serialized by whoever owns it:
//! the CLI holds it directly, the server behind a per-session async mutex.
//!
//! After every successful search or skip the detail for the recipe under
//! the cursor is assembled, recipes first and instructions second.
//!
//! Every phase change is also published on a watch channel, so a reader
//! that cannot take the session lock still sees `Searching` or `Saving`
//! while an action is in flight.

/// Bounded registry of server-held sessions
pub mod registry;

pub use registry::SessionRegistry;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::engine::{
    transition, CartAction, CartTriggers, CartView, Engine, Lookup, PagerAction, PagerState,
    PagerTriggers, Phase, SessionEvent, TriggerClock, UserAction,
};
use crate::errors::ErrorResponseDetails;
use crate::models::{Cart, IngredientRef, RecipeDetail, SelectedIngredients};

/// Snapshot of the recipe pane
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeView {
    /// Whether a recipe is displayed
    pub visible: bool,
    /// Displayed recipe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<RecipeDetail>,
    /// Cursor position within the batch
    pub cursor: usize,
    /// Recipes in the cached batch
    pub batch_len: usize,
    /// Current ingredient selection
    pub selected: SelectedIngredients,
    /// Phase after the action
    pub phase: Phase,
    /// Search failure behind a hidden pane
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponseDetails>,
    /// Instruction failure behind an empty step list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ErrorResponseDetails>,
}

/// State of one discovery session
pub struct Session {
    engine: Arc<Engine>,
    selected: SelectedIngredients,
    pager: PagerState,
    detail: Option<RecipeDetail>,
    cart: Cart,
    cart_visible: bool,
    phase: Phase,
    phase_tx: watch::Sender<Phase>,
    pager_clock: TriggerClock,
    cart_clock: TriggerClock,
    created_at: DateTime<Utc>,
}

impl Session {
    /// New session starting from a previously persisted cart
    #[must_use]
    pub fn new(engine: Arc<Engine>, cart: Cart) -> Self {
        let (phase_tx, _) = watch::channel(Phase::Idle);
        Self {
            engine,
            selected: SelectedIngredients::new(),
            pager: PagerState::default(),
            detail: None,
            cart,
            cart_visible: false,
            phase: Phase::Idle,
            phase_tx,
            pager_clock: TriggerClock::default(),
            cart_clock: TriggerClock::default(),
            created_at: Utc::now(),
        }
    }

    /// Creation time
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Receiver that follows every phase change without taking the session lock
    #[must_use]
    pub fn watch_phase(&self) -> watch::Receiver<Phase> {
        self.phase_tx.subscribe()
    }

    /// Current selection
    #[must_use]
    pub const fn selected(&self) -> &SelectedIngredients {
        &self.selected
    }

    /// Current cart
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Pager memory
    #[must_use]
    pub const fn pager(&self) -> &PagerState {
        &self.pager
    }

    /// Displayed recipe detail
    #[must_use]
    pub const fn detail(&self) -> Option<&RecipeDetail> {
        self.detail.as_ref()
    }

    /// Add an ingredient to the selection
    pub fn select(&mut self, name: &str) -> bool {
        self.selected.insert(name)
    }

    /// Remove an ingredient from the selection
    pub fn deselect(&mut self, name: &str) -> bool {
        self.selected.remove(name)
    }

    /// Replace the whole selection
    pub fn set_selection(&mut self, selected: SelectedIngredients) {
        self.selected = selected;
    }

    /// Suggestions for partial ingredient text; `None` for blank input
    pub async fn suggest(&self, search_text: &str) -> Option<Lookup> {
        self.engine
            .lookup
            .suggest(search_text, &self.selected)
            .await
    }

    /// Resolve a pager trigger set and run the winning action
    ///
    /// Returns `None` when nothing was pressed, the stamp was already handled,
    /// or the action is a no-op.
    pub async fn handle_pager_triggers(&mut self, triggers: PagerTriggers) -> Option<RecipeView> {
        let (action, stamp) = triggers.resolve()?;
        if !self.pager_clock.accept(stamp) {
            debug!(?action, stamp, "Ignoring stale pager trigger");
            return None;
        }
        self.run_pager(action).await
    }

    /// Run one pager action; `None` when it changes nothing
    pub async fn run_pager(&mut self, action: PagerAction) -> Option<RecipeView> {
        self.apply(SessionEvent::Begin(UserAction::Pager(action)));

        let Some(step) = self
            .engine
            .pager
            .advance(action, &self.selected, &self.pager)
            .await
        else {
            debug!(?action, "Pager action skipped: no ingredients selected or no batch");
            self.settle();
            return None;
        };

        if step.clear_selection {
            self.selected.clear();
        }
        self.pager = step.state;

        let mut warning = None;
        self.detail = match self.pager.current() {
            Some(recipe) => {
                let assembled = self.engine.detail.assemble(recipe).await;
                warning = assembled.warning;
                Some(assembled.detail)
            }
            None => None,
        };

        self.settle();
        info!(
            ?action,
            cursor = self.pager.cursor.index(),
            batch_len = self.pager.batch_len(),
            visible = self.pager.visible,
            "Pager action applied"
        );

        Some(RecipeView {
            error: step.error,
            warning,
            ..self.recipe_view()
        })
    }

    /// Resolve a cart trigger set and run the winning action
    ///
    /// `client_cart`, when given, replaces the session cart before the action
    /// runs; the server passes the blob the browser holds.
    pub async fn handle_cart_triggers(
        &mut self,
        triggers: CartTriggers,
        client_cart: Option<Cart>,
    ) -> Option<CartView> {
        let (action, stamp) = triggers.resolve()?;
        if !self.cart_clock.accept(stamp) {
            debug!(?action, stamp, "Ignoring stale cart trigger");
            return None;
        }
        if let Some(cart) = client_cart {
            self.cart = cart;
        }
        Some(self.run_cart(action).await)
    }

    /// Run one cart action against the displayed recipe's missing ingredients
    pub async fn run_cart(&mut self, action: CartAction) -> CartView {
        self.apply(SessionEvent::Begin(UserAction::Cart(action)));

        let missing: Vec<IngredientRef> = self
            .detail
            .as_ref()
            .filter(|_| self.pager.visible)
            .map(|detail| detail.missing_ingredients.clone())
            .unwrap_or_default();

        let view = self
            .engine
            .cart
            .save_to_cart(action, &self.cart, &missing)
            .await;

        self.cart = view.cart.clone();
        self.cart_visible = view.visible;
        self.settle();
        view
    }

    /// Snapshot of the recipe pane
    #[must_use]
    pub fn recipe_view(&self) -> RecipeView {
        RecipeView {
            visible: self.pager.visible,
            detail: self.detail.clone(),
            cursor: self.pager.cursor.index(),
            batch_len: self.pager.batch_len(),
            selected: self.selected.clone(),
            phase: self.phase,
            error: None,
            warning: None,
        }
    }

    /// Snapshot of the cart pane
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        let view = CartView::of(self.cart.clone());
        CartView {
            visible: self.cart_visible && view.visible,
            ..view
        }
    }

    fn settle(&mut self) {
        self.apply(SessionEvent::Settled {
            recipe_visible: self.pager.visible,
            cart_visible: self.cart_visible,
        });
    }

    fn apply(&mut self, event: SessionEvent) {
        self.phase = transition(self.phase, event);
        self.phase_tx.send_replace(self.phase);
    }
}
