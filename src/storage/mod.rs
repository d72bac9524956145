// ABOUTME: Client-local cart persistence behind a small async trait
// ABOUTME: JSON file store for the CLI and an in-memory store for tests and ephemeral runs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Cart storage
//!
//! The cart is persisted as an untyped JSON blob and validated into
//! [`Cart`] on load. A blob that does not decode loads as an empty cart
//! with a warning, so a corrupt file never blocks a session from starting.

mod file;
mod memory;

pub use file::FileCartStore;
pub use memory::MemoryCartStore;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::errors::AppResult;
use crate::models::Cart;

/// Persistence for one client's cart
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Load the persisted cart; missing storage yields an empty cart
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backing medium cannot be read.
    async fn load(&self) -> AppResult<Cart>;

    /// Replace the persisted cart
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backing medium cannot be written.
    async fn save(&self, cart: &Cart) -> AppResult<()>;
}

/// Validate an untyped blob, falling back to an empty cart
#[must_use]
pub fn cart_from_blob_or_empty(blob: Value) -> Cart {
    Cart::from_blob(blob).unwrap_or_else(|e| {
        warn!(error = %e, "Stored cart is invalid, starting with an empty cart");
        Cart::default()
    })
}
