// ABOUTME: Core types and constants for the Larder recipe discovery engine
// ABOUTME: Foundation crate with error handling, domain models, credential and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Larder Core
//!
//! Foundation crate providing shared types and constants for the Larder recipe
//! discovery engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ProviderError`
//! - **constants**: Application-wide constants organized by domain
//! - **credential**: The API key wrapper injected into the recipe API client
//! - **models**: Ingredients, recipes, cursor and cart records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// API credential value type
pub mod credential;

/// Core data models (ingredients, recipes, cursor, cart)
pub mod models;
