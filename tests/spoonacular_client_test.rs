// ABOUTME: Tests for the Spoonacular-compatible client against a local stub server
// ABOUTME: Covers decoding, key handling, error mapping and response caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use larder::errors::{AppError, ErrorCode};
use larder::models::SelectedIngredients;
use larder_core::credential::ApiCredential;
use larder_providers::{ProviderError, RecipeApi, SpoonacularClient, SpoonacularConfig};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const GOOD_KEY: &str = "good-key";

/// Requests seen by the stub, as `path` strings
#[derive(Default)]
struct StubLog {
    paths: Mutex<Vec<String>>,
}

impl StubLog {
    fn count(&self, path: &str) -> usize {
        self.paths.lock().unwrap().iter().filter(|p| *p == path).count()
    }
}

type Params = Query<HashMap<String, String>>;

fn authorized(log: &StubLog, path: &str, params: &HashMap<String, String>) -> bool {
    log.paths.lock().unwrap().push(path.to_owned());
    params.get("apiKey").map(String::as_str) == Some(GOOD_KEY)
}

async fn autocomplete(State(log): State<Arc<StubLog>>, Query(params): Params) -> Response {
    if !authorized(&log, "autocomplete", &params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let number: usize = params["number"].parse().unwrap();
    let entries: Vec<_> = [("egg", Some("egg.png")), ("egg white", None), ("eggplant", None)]
        .into_iter()
        .take(number)
        .map(|(name, image)| json!({ "name": name, "image": image }))
        .collect();
    Json(entries).into_response()
}

async fn find_by_ingredients(State(log): State<Arc<StubLog>>, Query(params): Params) -> Response {
    if !authorized(&log, "search", &params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    assert_eq!(params["ingredients"], "apples,flour");
    Json(json!([{
        "id": 641_803,
        "title": "Apple Crumble",
        "image": "https://img.spoonacular.com/recipes/641803-312x231.jpg",
        "imageType": "jpg",
        "likes": 1,
        "missedIngredientCount": 1,
        "usedIngredientCount": 1,
        "missedIngredients": [
            {"id": 1001, "amount": 0.5, "unit": "cup", "name": "butter", "aisle": "Milk, Eggs, Other Dairy",
             "image": "https://img.spoonacular.com/ingredients_100x100/butter-sliced.jpg"}
        ],
        "usedIngredients": [
            {"id": 9003, "amount": 6.0, "unit": "large", "name": "apples", "aisle": null,
             "image": "https://img.spoonacular.com/ingredients_100x100/apple.jpg"}
        ],
        "unusedIngredients": []
    }]))
    .into_response()
}

async fn instructions(
    State(log): State<Arc<StubLog>>,
    Path(id): Path<u64>,
    Query(params): Params,
) -> Response {
    if !authorized(&log, &format!("instructions:{id}"), &params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match id {
        1 => Json(json!([
            {"name": "", "steps": [
                {"number": 1, "step": "Slice apples.", "ingredients": []},
                {"number": 2, "step": "Bake.", "equipment": [{"name": "oven"}]}
            ]}
        ]))
        .into_response(),
        2 => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        3 => (StatusCode::OK, "{ not json").into_response(),
        4 => (StatusCode::PAYMENT_REQUIRED, "daily quota used up").into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn information(
    State(log): State<Arc<StubLog>>,
    Path(id): Path<u64>,
    Query(params): Params,
) -> Response {
    if !authorized(&log, &format!("price:{id}"), &params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    assert_eq!(params["amount"], "4.25");
    Json(json!({
        "id": id,
        "name": "bread flour",
        "estimatedCost": {"value": 0.74, "unit": "US Cents"}
    }))
    .into_response()
}

async fn start_stub() -> (SocketAddr, Arc<StubLog>) {
    common::init_test_logging();
    let log = Arc::new(StubLog::default());
    let app = Router::new()
        .route("/food/ingredients/autocomplete", get(autocomplete))
        .route("/recipes/findByIngredients", get(find_by_ingredients))
        .route("/recipes/:id/analyzedInstructions", get(instructions))
        .route("/food/ingredients/:id/information", get(information))
        .with_state(log.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, log)
}

fn client(addr: SocketAddr, key: &str) -> SpoonacularClient {
    let credential = ApiCredential::new(Some(key.to_owned())).unwrap();
    let config = SpoonacularConfig::new(credential).with_base_url(format!("http://{addr}/"));
    SpoonacularClient::with_http_client(config, reqwest::Client::new())
}

#[tokio::test]
async fn test_autocomplete_decodes_and_caches() {
    let (addr, log) = start_stub().await;
    let client = client(addr, GOOD_KEY);

    let first = client.autocomplete_ingredients("Egg", 2).await.unwrap();
    let second = client.autocomplete_ingredients("egg", 2).await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first[0].name, "egg");
    assert_eq!(first[0].image.as_deref(), Some("egg.png"));
    assert_eq!(first[1].image, None);
    assert_eq!(first, second);
    assert_eq!(log.count("autocomplete"), 1);

    client.clear_caches().await;
    client.autocomplete_ingredients("egg", 2).await.unwrap();
    assert_eq!(log.count("autocomplete"), 2);
}

#[tokio::test]
async fn test_caches_stay_within_capacity() {
    let (addr, log) = start_stub().await;
    let credential = ApiCredential::new(Some(GOOD_KEY.to_owned())).unwrap();
    let config = SpoonacularConfig::new(credential)
        .with_base_url(format!("http://{addr}"))
        .with_cache_capacity(2);
    let client = SpoonacularClient::with_http_client(config, reqwest::Client::new());

    for query in ["e", "eg", "egg", "eggp", "eggpl"] {
        client.autocomplete_ingredients(query, 3).await.unwrap();
    }
    assert_eq!(client.cached_entries().await, 2);
    assert_eq!(log.count("autocomplete"), 5);

    // "eggpl" is still held, "e" was evicted
    client.autocomplete_ingredients("eggpl", 3).await.unwrap();
    assert_eq!(log.count("autocomplete"), 5);
    client.autocomplete_ingredients("e", 3).await.unwrap();
    assert_eq!(log.count("autocomplete"), 6);

    for recipe_id in [1, 97, 98, 99] {
        client.analyzed_instructions(recipe_id).await.unwrap();
    }
    assert_eq!(client.cached_entries().await, 4);
    client.analyzed_instructions(1).await.unwrap();
    assert_eq!(log.count("instructions:1"), 2);
}

#[tokio::test]
async fn test_expired_entries_are_refetched() {
    let (addr, log) = start_stub().await;
    let credential = ApiCredential::new(Some(GOOD_KEY.to_owned())).unwrap();
    let config = SpoonacularConfig {
        cache_ttl_secs: 0,
        ..SpoonacularConfig::new(credential).with_base_url(format!("http://{addr}"))
    };
    let client = SpoonacularClient::with_http_client(config, reqwest::Client::new());

    client.analyzed_instructions(1).await.unwrap();
    client.analyzed_instructions(1).await.unwrap();

    assert_eq!(log.count("instructions:1"), 2);
}

#[tokio::test]
async fn test_find_by_ingredients_decodes_recipes() {
    let (addr, _log) = start_stub().await;
    let selected: SelectedIngredients = ["apples", "flour"].into_iter().collect();

    let recipes = client(addr, GOOD_KEY)
        .find_by_ingredients(&selected, 30)
        .await
        .unwrap();

    assert_eq!(recipes.len(), 1);
    let recipe = &recipes[0];
    assert_eq!(recipe.id, 641_803);
    assert_eq!(recipe.missed_ingredient_count, 1);
    assert_eq!(recipe.missed_ingredients[0].name, "butter");
    assert_eq!(recipe.used_ingredients[0].aisle, "");
}

#[tokio::test]
async fn test_instructions_decode_and_cache() {
    let (addr, log) = start_stub().await;
    let client = client(addr, GOOD_KEY);

    let blocks = client.analyzed_instructions(1).await.unwrap();
    client.analyzed_instructions(1).await.unwrap();

    assert_eq!(blocks.len(), 1);
    let steps: Vec<_> = blocks[0].steps.iter().map(|s| s.step.as_str()).collect();
    assert_eq!(steps, vec!["Slice apples.", "Bake."]);
    assert_eq!(log.count("instructions:1"), 1);
    assert!(client.analyzed_instructions(99).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_estimated_cost_reads_value() {
    let (addr, _log) = start_stub().await;
    let flour = larder::models::IngredientRef {
        id: 10_120_129,
        name: "bread flour".to_owned(),
        aisle: "Baking".to_owned(),
        amount: 4.25,
        unit: "cups".to_owned(),
        image: None,
        cost: None,
    };

    let cost = client(addr, GOOD_KEY).estimated_cost(&flour).await.unwrap();

    assert!((cost - 0.74).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_rejected_key_is_unauthorized() {
    let (addr, _log) = start_stub().await;

    let err = client(addr, "wrong-key")
        .autocomplete_ingredients("egg", 8)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Unauthorized { .. }));
    assert_eq!(AppError::from(err).code, ErrorCode::ExternalAuthFailed);
}

#[tokio::test]
async fn test_server_error_is_retryable_api_error() {
    let (addr, _log) = start_stub().await;
    let client = client(addr, GOOD_KEY);

    match client.analyzed_instructions(2).await.unwrap_err() {
        ProviderError::ApiError {
            status_code,
            retryable,
            ..
        } => {
            assert_eq!(status_code, 500);
            assert!(retryable);
        }
        other => panic!("expected ApiError, got {other:?}"),
    }

    match client.analyzed_instructions(4).await.unwrap_err() {
        ProviderError::ApiError {
            status_code,
            retryable,
            ..
        } => {
            assert_eq!(status_code, 402);
            assert!(!retryable);
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let (addr, _log) = start_stub().await;

    let err = client(addr, GOOD_KEY)
        .analyzed_instructions(3)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::ParseError { .. }));
    assert_eq!(AppError::from(err).code, ErrorCode::UpstreamDataInvalid);
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    common::init_test_logging();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr, GOOD_KEY)
        .autocomplete_ingredients("egg", 8)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NetworkError(_)));
    let app_error = AppError::from(err);
    assert_eq!(app_error.code, ErrorCode::ExternalServiceUnavailable);
}
