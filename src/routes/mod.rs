// ABOUTME: HTTP route assembly for the session server
// ABOUTME: Shared server resources, health routes and session routes behind a trace layer
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! HTTP routes
//!
//! The server keeps per-session memory (selection, batch, cursor); the cart
//! stays with the client and is sent along with every cart action.

/// Health check routes
pub mod health;
/// Session routes
pub mod sessions;

pub use health::HealthRoutes;
pub use sessions::SessionRoutes;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::session::SessionRegistry;

/// State shared by every handler
pub struct ServerResources {
    /// Live sessions
    pub registry: SessionRegistry,
    /// Upstream provider name, reported by the health check
    pub provider: &'static str,
}

impl ServerResources {
    /// Resources over `registry`
    #[must_use]
    pub const fn new(registry: SessionRegistry, provider: &'static str) -> Self {
        Self { registry, provider }
    }
}

/// Complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(SessionRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
}
