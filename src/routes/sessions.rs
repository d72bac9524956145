// ABOUTME: Route handlers for discovery sessions: suggestions, selection, pager and cart actions
// ABOUTME: Trigger timestamps come from the client; the cart blob travels with every cart action
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Session routes
//!
//! | Method | Path | Answer |
//! |--------|------|--------|
//! | `POST` | `/api/sessions` | 201 with the session id |
//! | `GET` | `/api/sessions/:id` | recipe and cart snapshot, phase only while an action runs |
//! | `DELETE` | `/api/sessions/:id` | 204 |
//! | `GET` | `/api/sessions/:id/suggestions?q=` | options, 204 for blank text |
//! | `PUT` | `/api/sessions/:id/selection` | the stored selection |
//! | `POST` | `/api/sessions/:id/recipes` | recipe view, 204 when nothing changes |
//! | `POST` | `/api/sessions/:id/cart` | cart view, 204 when nothing changes |

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use super::ServerResources;
use crate::engine::{CartTriggers, CartView, PagerTriggers, Phase};
use crate::errors::AppError;
use crate::models::SelectedIngredients;
use crate::session::registry::SessionEntry;
use crate::session::RecipeView;
use crate::storage::cart_from_blob_or_empty;

/// Response for a newly opened session
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    /// Session id used in every other path
    pub session_id: Uuid,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Session snapshot
///
/// While a pager or cart action holds the session, only the published
/// phase is known and both panes are omitted.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    /// Session id
    pub session_id: Uuid,
    /// Current phase
    pub phase: Phase,
    /// An action is in flight
    pub busy: bool,
    /// Recipe pane
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<RecipeView>,
    /// Cart pane
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart: Option<CartView>,
}

/// Query of the suggestions endpoint
#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    /// Partial ingredient text
    #[serde(default)]
    pub q: String,
}

/// Body of the selection endpoint
#[derive(Debug, Deserialize)]
pub struct SelectionBody {
    /// Selected ingredient names in order
    pub ingredients: Vec<String>,
}

/// Response of the selection endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionResponse {
    /// Stored selection after dedup
    pub selected: SelectedIngredients,
}

/// Body of the cart endpoint
#[derive(Debug, Deserialize)]
pub struct CartActionBody {
    /// Button stamps
    #[serde(flatten)]
    pub triggers: CartTriggers,
    /// Cart blob held by the client
    #[serde(default)]
    pub cart: Option<Value>,
}

/// Session routes handler
pub struct SessionRoutes;

impl SessionRoutes {
    /// Create all session routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/sessions", post(Self::handle_create))
            .route(
                "/api/sessions/:id",
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .route(
                "/api/sessions/:id/suggestions",
                get(Self::handle_suggestions),
            )
            .route("/api/sessions/:id/selection", put(Self::handle_selection))
            .route("/api/sessions/:id/recipes", post(Self::handle_recipes))
            .route("/api/sessions/:id/cart", post(Self::handle_cart))
            .with_state(resources)
    }

    fn parse_id(raw: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(raw)
            .map_err(|_| AppError::invalid_input(format!("Invalid session id: {raw}")))
    }

    async fn session(
        resources: &ServerResources,
        raw_id: &str,
    ) -> Result<(Uuid, SessionEntry), AppError> {
        let id = Self::parse_id(raw_id)?;
        let entry = resources
            .registry
            .get(&id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Session {id}")))?;
        Ok((id, entry))
    }

    /// Handle POST /api/sessions
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let (session_id, entry) = resources.registry.create().await;
        let created_at = entry.handle.lock().await.created_at();
        Ok((
            StatusCode::CREATED,
            Json(CreateSessionResponse {
                session_id,
                created_at,
            }),
        )
            .into_response())
    }

    /// Handle GET /api/sessions/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let (session_id, entry) = Self::session(&resources, &id).await?;
        let snapshot = match entry.handle.try_lock() {
            Ok(session) => SessionSnapshot {
                session_id,
                phase: session.phase(),
                busy: false,
                recipe: Some(session.recipe_view()),
                cart: Some(session.cart_view()),
            },
            Err(_) => SessionSnapshot {
                session_id,
                phase: entry.published_phase(),
                busy: true,
                recipe: None,
                cart: None,
            },
        };
        Ok((StatusCode::OK, Json(snapshot)).into_response())
    }

    /// Handle DELETE /api/sessions/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = Self::parse_id(&id)?;
        if resources.registry.remove(&id).await {
            Ok(StatusCode::NO_CONTENT.into_response())
        } else {
            Err(AppError::not_found(format!("Session {id}")))
        }
    }

    /// Handle GET /api/sessions/:id/suggestions
    async fn handle_suggestions(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Query(query): Query<SuggestionsQuery>,
    ) -> Result<Response, AppError> {
        let (_, entry) = Self::session(&resources, &id).await?;
        let session = entry.handle.lock().await;
        Ok(match session.suggest(&query.q).await {
            Some(lookup) => (StatusCode::OK, Json(lookup)).into_response(),
            None => StatusCode::NO_CONTENT.into_response(),
        })
    }

    /// Handle PUT /api/sessions/:id/selection
    async fn handle_selection(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(body): Json<SelectionBody>,
    ) -> Result<Response, AppError> {
        let (_, entry) = Self::session(&resources, &id).await?;
        let mut session = entry.handle.lock().await;
        session.set_selection(body.ingredients.into_iter().collect());
        let response = SelectionResponse {
            selected: session.selected().clone(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/sessions/:id/recipes
    async fn handle_recipes(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(triggers): Json<PagerTriggers>,
    ) -> Result<Response, AppError> {
        let (_, entry) = Self::session(&resources, &id).await?;
        let mut session = entry.handle.lock().await;
        Ok(match session.handle_pager_triggers(triggers).await {
            Some(view) => (StatusCode::OK, Json(view)).into_response(),
            None => StatusCode::NO_CONTENT.into_response(),
        })
    }

    /// Handle POST /api/sessions/:id/cart
    async fn handle_cart(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(body): Json<CartActionBody>,
    ) -> Result<Response, AppError> {
        let (_, entry) = Self::session(&resources, &id).await?;
        let client_cart = body.cart.map(cart_from_blob_or_empty);
        let mut session = entry.handle.lock().await;
        Ok(
            match session.handle_cart_triggers(body.triggers, client_cart).await {
                Some(view) => (StatusCode::OK, Json(view)).into_response(),
                None => StatusCode::NO_CONTENT.into_response(),
            },
        )
    }
}
