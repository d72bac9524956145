// ABOUTME: Recipe data provider abstractions and the Spoonacular-compatible client
// ABOUTME: Shared HTTP client, the RecipeApi trait and its HTTP implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe data provider implementations and core abstractions.
//!
//! The engine only talks to the upstream food-data service through the
//! [`RecipeApi`] trait, so tests and alternative backends plug in without
//! touching engine code.

// Re-export larder-core modules so provider files can keep `use crate::errors::*` etc.
pub use larder_core::constants;
pub use larder_core::errors;
pub use larder_core::models;

/// Core provider trait and request/response records
pub mod core;
/// Shared HTTP client for provider API calls
pub mod http_client;
/// Spoonacular-compatible HTTP client
pub mod spoonacular;

pub use core::{AutocompleteEntry, RecipeApi};
pub use http_client::{initialize_shared_client, shared_client};
pub use larder_core::errors::provider::{ProviderError, ProviderResult};
pub use spoonacular::{SpoonacularClient, SpoonacularConfig};
