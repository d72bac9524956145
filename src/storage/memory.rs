// ABOUTME: In-memory cart store for tests and runs that should not touch disk
// ABOUTME: Holds the untyped blob so loads go through the same validation as the file store
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{cart_from_blob_or_empty, CartStore};
use crate::errors::AppResult;
use crate::models::Cart;

/// Cart blob kept in process memory
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    blob: RwLock<Value>,
}

impl MemoryCartStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an arbitrary blob, valid or not
    #[must_use]
    pub fn with_blob(blob: Value) -> Self {
        Self {
            blob: RwLock::new(blob),
        }
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn load(&self) -> AppResult<Cart> {
        Ok(cart_from_blob_or_empty(self.blob.read().await.clone()))
    }

    async fn save(&self, cart: &Cart) -> AppResult<()> {
        *self.blob.write().await = cart.to_blob();
        Ok(())
    }
}
