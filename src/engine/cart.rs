// ABOUTME: Cart accumulator pricing missing ingredients and merging them into the cart
// ABOUTME: Also holds the pure table projection with its trailing total row
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Cart Accumulator
//!
//! `Save` prices every missing ingredient of the displayed recipe and appends
//! them after the existing entries. A failed price becomes `0.0` and is
//! reported in [`CartView::pricing_failures`]; the remaining ingredients are
//! still priced. `Empty` drops everything.

use futures_util::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::triggers::CartAction;
use crate::constants::labels::TOTAL_ROW_NAME;
use crate::errors::{AppError, ErrorResponseDetails};
use crate::models::{Cart, CartRow, CartTable, IngredientRef};
use larder_providers::RecipeApi;

/// Ingredient that could not be priced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingFailure {
    /// Upstream ingredient id
    pub ingredient_id: u64,
    /// Ingredient name
    pub name: String,
    /// Failure behind the zero price
    pub error: ErrorResponseDetails,
}

/// Cart state after a cart action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    /// Cart to persist
    pub cart: Cart,
    /// Table projection; absent when the cart is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<CartTable>,
    /// Whether the table is displayed
    pub visible: bool,
    /// Ingredients saved with a zero price
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pricing_failures: Vec<PricingFailure>,
}

impl CartView {
    /// Hidden view over an empty cart
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cart: Cart::default(),
            table: None,
            visible: false,
            pricing_failures: Vec::new(),
        }
    }

    /// View over `cart`, shown when it holds anything
    #[must_use]
    pub fn of(cart: Cart) -> Self {
        if cart.is_empty() {
            return Self::empty();
        }
        Self {
            table: Some(make_cart(cart.items())),
            cart,
            visible: true,
            pricing_failures: Vec::new(),
        }
    }
}

/// Prices and accumulates missing ingredients
pub struct CartAccumulator {
    api: Arc<dyn RecipeApi>,
}

impl CartAccumulator {
    /// Accumulator pricing through `api`
    #[must_use]
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        Self { api }
    }

    /// Apply `action` to `current` with the displayed recipe's `missing` ingredients
    pub async fn save_to_cart(
        &self,
        action: CartAction,
        current: &Cart,
        missing: &[IngredientRef],
    ) -> CartView {
        match action {
            CartAction::Empty => {
                info!(items = current.len(), "Cart emptied");
                CartView::empty()
            }
            CartAction::Save => {
                let (priced, pricing_failures) = self.price_all(missing).await;
                let merged = merge_cart(current, priced);
                info!(
                    added = missing.len(),
                    total_items = merged.len(),
                    failed_prices = pricing_failures.len(),
                    "Saved missing ingredients to cart"
                );
                CartView {
                    pricing_failures,
                    ..CartView::of(merged)
                }
            }
        }
    }

    /// Price every ingredient concurrently, keeping input order
    async fn price_all(
        &self,
        missing: &[IngredientRef],
    ) -> (Vec<IngredientRef>, Vec<PricingFailure>) {
        let results = join_all(
            missing
                .iter()
                .map(|ingredient| self.api.estimated_cost(ingredient)),
        )
        .await;

        let mut failures = Vec::new();
        let priced = missing
            .iter()
            .zip(results)
            .map(|(ingredient, result)| match result {
                Ok(cost) => ingredient.priced(cost),
                Err(e) => {
                    warn!(
                        ingredient.id = ingredient.id,
                        ingredient.name = %ingredient.name,
                        error = %e,
                        "Pricing failed, saving at 0.00"
                    );
                    let error = AppError::from(e);
                    failures.push(PricingFailure {
                        ingredient_id: ingredient.id,
                        name: ingredient.name.clone(),
                        error: ErrorResponseDetails::from(&error),
                    });
                    ingredient.priced(0.0)
                }
            })
            .collect();

        (priced, failures)
    }
}

/// Prior entries first, then `priced`; duplicates are kept
#[must_use]
pub fn merge_cart(prior: &Cart, priced: Vec<IngredientRef>) -> Cart {
    let mut merged = prior.clone();
    merged.extend(priced);
    merged
}

/// Table projection of `items` with a trailing total row
///
/// Only name, aisle and cost are kept. The total is rounded to cents.
#[must_use]
pub fn make_cart(items: &[IngredientRef]) -> CartTable {
    let rows: Vec<CartRow> = items
        .iter()
        .map(|item| CartRow {
            name: item.name.clone(),
            aisle: item.aisle.clone(),
            cost: item.cost_or_zero(),
        })
        .collect();

    let sum: f64 = rows.iter().map(|row| row.cost).sum();
    let total = CartRow {
        name: TOTAL_ROW_NAME.to_owned(),
        aisle: String::new(),
        cost: round_to_cents(sum),
    };

    CartTable::new(rows, total)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
