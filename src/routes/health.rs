// ABOUTME: Health check route for service monitoring
// ABOUTME: Reports liveness, the upstream provider and the live session count
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use super::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    /// Handle GET /health
    async fn handle_health(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "service": crate::constants::service_names::LARDER_SERVER,
            "version": env!("CARGO_PKG_VERSION"),
            "provider": resources.provider,
            "sessions": resources.registry.len().await,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
