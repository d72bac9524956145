// ABOUTME: Main library entry point for the Larder recipe discovery engine
// ABOUTME: Ingredient lookup, recipe paging, detail assembly and a priced shopping cart
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Larder
//!
//! A recipe discovery session engine. A user picks ingredients they have,
//! the engine queries a Spoonacular-compatible recipe API for candidate
//! recipes, shows them one at a time with their missing ingredients, and
//! accumulates a priced shopping cart.
//!
//! ## Architecture
//!
//! - **Engine**: lookup, pager, detail assembler and cart accumulator
//! - **Session**: per-user state, trigger resolution and the phase machine
//! - **Routes**: the HTTP session service used by `larder-server`
//! - **Storage**: client-local cart persistence used by `larder-cli`
//! - **Config**: environment-backed configuration, validated once at startup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use larder::config::LarderConfig;
//! use larder::engine::{Engine, PagerAction};
//! use larder::models::Cart;
//! use larder::session::Session;
//! use larder_providers::SpoonacularClient;
//!
//! #[tokio::main]
//! async fn main() -> larder::errors::AppResult<()> {
//!     let config = LarderConfig::from_env()?;
//!     let api = Arc::new(SpoonacularClient::new(config.spoonacular_config()));
//!     let engine = Arc::new(Engine::new(api, config.engine));
//!
//!     let mut session = Session::new(engine, Cart::default());
//!     session.select("flour");
//!     if let Some(view) = session.run_pager(PagerAction::Search).await {
//!         println!("{} recipes", view.batch_len);
//!     }
//!     Ok(())
//! }
//! ```

// Re-export the foundation crate so callers use one path
pub use larder_core::constants;
pub use larder_core::errors;
pub use larder_core::models;

/// Environment-backed configuration
pub mod config;

/// Recipe discovery engine components
pub mod engine;

/// Structured logging setup
pub mod logging;

/// HTTP routes of the session server
pub mod routes;

/// Discovery sessions and the server-side registry
pub mod session;

/// Client-local cart persistence
pub mod storage;
