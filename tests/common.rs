// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Quiet logging plus engine, session and router builders over the scripted API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `larder`

use larder::config::EngineSettings;
use larder::engine::Engine;
use larder::models::Cart;
use larder::routes::{self, ServerResources};
use larder::session::{Session, SessionRegistry};
use larder_providers::RecipeApi;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; tests stay quiet by default
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Engine over `api` with default sizes
pub fn engine_with(api: Arc<dyn RecipeApi>) -> Arc<Engine> {
    init_test_logging();
    Arc::new(Engine::new(api, EngineSettings::default()))
}

/// Fresh session with an empty cart
pub fn session_with(api: Arc<dyn RecipeApi>) -> Session {
    Session::new(engine_with(api), Cart::default())
}

/// Application router holding at most `capacity` sessions
pub fn router_with(api: Arc<dyn RecipeApi>, capacity: usize) -> axum::Router {
    let registry = SessionRegistry::new(engine_with(api), capacity);
    routes::router(Arc::new(ServerResources::new(registry, "mock")))
}
