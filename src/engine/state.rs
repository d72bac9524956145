// ABOUTME: Session phase state machine with typed events and a pure transition function
// ABOUTME: Exposes loading phases for searches, pagination and cart saves
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};

use super::triggers::{CartAction, PagerAction};

/// Where a session currently is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing displayed
    #[default]
    Idle,
    /// Recipe search in flight
    Searching,
    /// A recipe is displayed
    Displaying,
    /// Moving to the next recipe of the batch
    Paginating,
    /// Pricing missing ingredients
    Saving,
    /// The cart table is displayed
    CartVisible,
}

/// User action accepted by a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// Pager button
    Pager(PagerAction),
    /// Cart button
    Cart(CartAction),
}

/// Input of the phase machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// An accepted action starts its computation chain
    Begin(UserAction),
    /// The chain finished; visibility of both views afterwards
    Settled {
        /// Whether a recipe is displayed
        recipe_visible: bool,
        /// Whether the cart table is displayed
        cart_visible: bool,
    },
}

/// Next phase after `event`
#[must_use]
pub const fn transition(phase: Phase, event: SessionEvent) -> Phase {
    match event {
        SessionEvent::Begin(UserAction::Pager(PagerAction::Search)) => Phase::Searching,
        SessionEvent::Begin(UserAction::Pager(PagerAction::Skip)) => Phase::Paginating,
        SessionEvent::Begin(UserAction::Cart(CartAction::Save)) => Phase::Saving,
        // Clear and Empty do no I/O; the phase only changes once they settle
        SessionEvent::Begin(UserAction::Pager(PagerAction::Clear))
        | SessionEvent::Begin(UserAction::Cart(CartAction::Empty)) => phase,
        SessionEvent::Settled {
            cart_visible: true, ..
        } => Phase::CartVisible,
        SessionEvent::Settled {
            recipe_visible: true,
            ..
        } => Phase::Displaying,
        SessionEvent::Settled { .. } => Phase::Idle,
    }
}
