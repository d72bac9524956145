// ABOUTME: Spoonacular-compatible food API client for autocomplete, recipe search, steps and prices
// ABOUTME: Maps HTTP 401, transport failures and malformed bodies to distinct provider errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Spoonacular API Client
//!
//! Implements [`RecipeApi`] over the Spoonacular food API. The API key is
//! sent as the `apiKey` query parameter on every request.
//!
//! # Features
//! - Ingredient autocomplete, recipe search by ingredients, analyzed
//!   instructions and ingredient pricing
//! - Short-lived caching of autocomplete and instruction responses, so
//!   repeated keystrokes and cycling through a batch do not re-query.
//!   Both caches are LRU-bounded; expired entries are dropped on lookup
//! - HTTP 401 logged distinctly from other failures
//!
//! # API Reference
//! <https://spoonacular.com/food-api/docs>
//!
//! # Example
//! ```rust,no_run
//! use larder_core::credential::ApiCredential;
//! use larder_providers::{RecipeApi, SpoonacularClient, SpoonacularConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credential = ApiCredential::new(std::env::var("LARDER_API_KEY").ok())?;
//! let client = SpoonacularClient::new(SpoonacularConfig::new(credential));
//! let suggestions = client.autocomplete_ingredients("egg", 8).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use lru::LruCache;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::constants::api::{
    API_KEY_PARAM, AUTOCOMPLETE_PATH, DEFAULT_BASE_URL, FIND_BY_INGREDIENTS_PATH,
    INGREDIENT_INFORMATION_PATH, INSTRUCTIONS_PATH, PROVIDER_NAME,
};
use crate::core::{AutocompleteEntry, RecipeApi};
use crate::errors::{ProviderError, ProviderResult};
use crate::http_client::shared_client;
use larder_core::credential::ApiCredential;
use larder_core::models::{IngredientRef, InstructionBlock, Recipe, SelectedIngredients};

/// Spoonacular client configuration
#[derive(Debug, Clone)]
pub struct SpoonacularConfig {
    /// API key
    pub credential: ApiCredential,
    /// Base URL (default: <https://api.spoonacular.com>)
    pub base_url: String,
    /// Cache TTL in seconds for autocomplete and instructions (default: 300)
    pub cache_ttl_secs: u64,
    /// Entries kept per cache before the least recently used is evicted (default: 512)
    pub cache_capacity: usize,
}

impl SpoonacularConfig {
    /// Configuration with the default base URL
    #[must_use]
    pub fn new(credential: ApiCredential) -> Self {
        Self {
            credential,
            base_url: DEFAULT_BASE_URL.to_owned(),
            cache_ttl_secs: 300,
            cache_capacity: DEFAULT_CACHE_CAPACITY.get(),
        }
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Override the per-cache entry limit; zero falls back to the default
    #[must_use]
    pub const fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(512) {
    Some(n) => n,
    None => unreachable!(),
};

/// Ingredient information response; only the price is read
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IngredientInformationResponse {
    estimated_cost: EstimatedCost,
}

#[derive(Debug, Deserialize)]
struct EstimatedCost {
    value: f64,
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// LRU cache whose entries also expire
struct ExpiringCache<K: Hash + Eq, V> {
    store: RwLock<LruCache<K, CacheEntry<V>>>,
    ttl: Duration,
}

impl<K: Hash + Eq, V: Clone> ExpiringCache<K, V> {
    fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            store: RwLock::new(LruCache::new(capacity)),
            ttl,
        }
    }

    async fn get(&self, key: &K) -> Option<V> {
        // LruCache::get is mutable (updates access order)
        let mut store = self.store.write().await;
        if let Some(entry) = store.get(key) {
            if !entry.is_expired() {
                return Some(entry.data.clone());
            }
            store.pop(key);
        }
        None
    }

    async fn insert(&self, key: K, data: V) {
        // LruCache evicts the least recently used entry on push when full
        self.store.write().await.push(
            key,
            CacheEntry {
                data,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    async fn clear(&self) {
        self.store.write().await.clear();
    }

    async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

/// Spoonacular food API client
pub struct SpoonacularClient {
    config: SpoonacularConfig,
    http_client: reqwest::Client,
    autocomplete_cache: ExpiringCache<String, Vec<AutocompleteEntry>>,
    instructions_cache: ExpiringCache<u64, Vec<InstructionBlock>>,
}

impl SpoonacularClient {
    /// Create a client on the shared connection pool
    #[must_use]
    pub fn new(config: SpoonacularConfig) -> Self {
        Self::with_http_client(config, shared_client().clone())
    }

    /// Create a client on a caller-supplied HTTP client
    #[must_use]
    pub fn with_http_client(config: SpoonacularConfig, http_client: reqwest::Client) -> Self {
        let capacity =
            NonZeroUsize::new(config.cache_capacity).unwrap_or(DEFAULT_CACHE_CAPACITY);
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        Self {
            config,
            http_client,
            autocomplete_cache: ExpiringCache::new(capacity, ttl),
            instructions_cache: ExpiringCache::new(capacity, ttl),
        }
    }

    /// Clear all caches
    pub async fn clear_caches(&self) {
        self.autocomplete_cache.clear().await;
        self.instructions_cache.clear().await;
    }

    /// Entries currently held across both caches
    pub async fn cached_entries(&self) -> usize {
        self.autocomplete_cache.len().await + self.instructions_cache.len().await
    }

    /// GET `path` with `query` plus the API key and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ProviderResult<T> {
        let url = format!("{}{path}", self.config.base_url);
        let started = Instant::now();

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .query(&[(API_KEY_PARAM, self.config.credential.expose())])
            .send()
            .await
            .map_err(|e| {
                error!(path, error = %e, "Transport error calling recipe API");
                ProviderError::NetworkError(e.to_string())
            })?;

        let status = response.status();
        debug!(
            path,
            http.status = status.as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Recipe API response"
        );

        if status == StatusCode::UNAUTHORIZED {
            error!(path, "API key related error: recipe API answered 401");
            return Err(ProviderError::Unauthorized {
                provider: PROVIDER_NAME.to_owned(),
            });
        }

        let text = response.text().await.map_err(|e| {
            error!(path, error = %e, "Failed reading recipe API response body");
            ProviderError::NetworkError(e.to_string())
        })?;

        if !status.is_success() {
            error!(path, http.status = status.as_u16(), "HTTP error occurred");
            return Err(ProviderError::ApiError {
                provider: PROVIDER_NAME.to_owned(),
                status_code: status.as_u16(),
                message: format!("request failed with status {status}: {text}"),
                retryable: status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            warn!(path, error = %e, "Recipe API returned an unexpected body");
            ProviderError::ParseError {
                provider: PROVIDER_NAME.to_owned(),
                reason: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl RecipeApi for SpoonacularClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn autocomplete_ingredients(
        &self,
        query: &str,
        limit: u32,
    ) -> ProviderResult<Vec<AutocompleteEntry>> {
        let cache_key = format!("{}:{limit}", query.to_lowercase());
        if let Some(entries) = self.autocomplete_cache.get(&cache_key).await {
            return Ok(entries);
        }

        debug!(query, "Doing an ingredient query");
        let entries: Vec<AutocompleteEntry> = self
            .get_json(
                AUTOCOMPLETE_PATH,
                &[("query", query.to_owned()), ("number", limit.to_string())],
            )
            .await?;

        self.autocomplete_cache
            .insert(cache_key, entries.clone())
            .await;

        Ok(entries)
    }

    async fn find_by_ingredients(
        &self,
        ingredients: &SelectedIngredients,
        limit: u32,
    ) -> ProviderResult<Vec<Recipe>> {
        debug!(ingredients = %ingredients.query_value(), limit, "Searching recipes");
        self.get_json(
            FIND_BY_INGREDIENTS_PATH,
            &[
                ("ingredients", ingredients.query_value()),
                ("number", limit.to_string()),
            ],
        )
        .await
    }

    async fn analyzed_instructions(&self, recipe_id: u64) -> ProviderResult<Vec<InstructionBlock>> {
        if let Some(blocks) = self.instructions_cache.get(&recipe_id).await {
            return Ok(blocks);
        }

        let path = INSTRUCTIONS_PATH.replace("{id}", &recipe_id.to_string());
        let blocks: Vec<InstructionBlock> = self
            .get_json(&path, &[("stepBreakdown", "true".to_owned())])
            .await?;

        self.instructions_cache.insert(recipe_id, blocks.clone()).await;

        Ok(blocks)
    }

    async fn estimated_cost(&self, ingredient: &IngredientRef) -> ProviderResult<f64> {
        let path = INGREDIENT_INFORMATION_PATH.replace("{id}", &ingredient.id.to_string());
        let information: IngredientInformationResponse = self
            .get_json(&path, &[("amount", ingredient.amount.to_string())])
            .await?;

        let value = information.estimated_cost.value;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ProviderError::ParseError {
                provider: PROVIDER_NAME.to_owned(),
                reason: format!("non-finite estimated cost for ingredient {}", ingredient.id),
            })
        }
    }
}
