// ABOUTME: JSON file cart store used by the interactive client between runs
// ABOUTME: Writes through a temporary file and rename so a crash never leaves a torn cart
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{cart_from_blob_or_empty, CartStore};
use crate::errors::{AppError, AppResult};
use crate::models::Cart;

/// Cart persisted as a JSON array in one file
#[derive(Debug, Clone)]
pub struct FileCartStore {
    path: PathBuf,
}

impl FileCartStore {
    /// Store backed by `path`; parent directories are created on first save
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CartStore for FileCartStore {
    async fn load(&self) -> AppResult<Cart> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stored cart yet");
                return Ok(Cart::default());
            }
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to read cart file {}",
                    self.path.display()
                ))
                .with_source(e))
            }
        };

        if text.trim().is_empty() {
            return Ok(Cart::default());
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(blob) => Ok(cart_from_blob_or_empty(blob)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cart file is not JSON, starting with an empty cart");
                Ok(Cart::default())
            }
        }
    }

    async fn save(&self, cart: &Cart) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let body = serde_json::to_vec_pretty(&cart.to_blob())?;
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, body).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        debug!(path = %self.path.display(), items = cart.len(), "Cart saved");
        Ok(())
    }
}
