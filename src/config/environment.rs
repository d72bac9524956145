// ABOUTME: Environment-based configuration for the Larder server and CLI
// ABOUTME: Loads, validates and summarizes settings; the API key is checked here, once
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment configuration
//!
//! Every setting comes from an environment variable with a default, except
//! the API key which is required. Loading never exits the process: a missing
//! key is an `AppError` with `ErrorCode::ConfigMissing` and the binaries
//! decide what to do with it.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

use crate::constants::{api, env_vars, limits};
use crate::errors::{AppError, AppResult};
use larder_core::credential::ApiCredential;
use larder_providers::SpoonacularConfig;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Settings for the upstream recipe API
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// API key
    pub credential: ApiCredential,
    /// Base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

/// Engine result sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Recipes fetched per search
    pub recipe_batch_size: u32,
    /// Autocomplete suggestions requested per query
    pub autocomplete_limit: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            recipe_batch_size: limits::RECIPE_BATCH_SIZE,
            autocomplete_limit: limits::AUTOCOMPLETE_LIMIT,
        }
    }
}

/// Session server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Bind host
    pub host: String,
    /// Bind port
    pub http_port: u16,
    /// Session registry capacity
    pub max_sessions: usize,
}

/// Complete runtime configuration
#[derive(Debug, Clone)]
pub struct LarderConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Upstream API settings
    pub upstream: UpstreamConfig,
    /// Engine result sizes
    pub engine: EngineSettings,
    /// Session server settings
    pub server: ServerSettings,
    /// Cart file used by the CLI
    pub cart_path: PathBuf,
}

impl LarderConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when `LARDER_API_KEY` is absent or blank and
    /// `ConfigInvalid` when a value cannot be parsed or is out of range.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        let config = Self::from_source(|key| env::var(key).ok())?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_source<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let credential = ApiCredential::new(lookup(env_vars::API_KEY))?;

        let config = Self {
            environment: Environment::from_str_or_default(&var_or(
                env_vars::ENVIRONMENT,
                "development",
            )),
            upstream: UpstreamConfig {
                credential,
                base_url: var_or(env_vars::API_BASE_URL, api::DEFAULT_BASE_URL)
                    .trim_end_matches('/')
                    .to_owned(),
                timeout_secs: parse_value(
                    env_vars::HTTP_TIMEOUT_SECS,
                    &var_or(
                        env_vars::HTTP_TIMEOUT_SECS,
                        &limits::DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
                    ),
                )?,
                connect_timeout_secs: parse_value(
                    env_vars::CONNECT_TIMEOUT_SECS,
                    &var_or(
                        env_vars::CONNECT_TIMEOUT_SECS,
                        &limits::DEFAULT_CONNECT_TIMEOUT_SECS.to_string(),
                    ),
                )?,
            },
            engine: EngineSettings {
                recipe_batch_size: parse_value(
                    env_vars::RECIPE_BATCH_SIZE,
                    &var_or(
                        env_vars::RECIPE_BATCH_SIZE,
                        &limits::RECIPE_BATCH_SIZE.to_string(),
                    ),
                )?,
                autocomplete_limit: parse_value(
                    env_vars::AUTOCOMPLETE_LIMIT,
                    &var_or(
                        env_vars::AUTOCOMPLETE_LIMIT,
                        &limits::AUTOCOMPLETE_LIMIT.to_string(),
                    ),
                )?,
            },
            server: ServerSettings {
                host: var_or(env_vars::HOST, "0.0.0.0"),
                http_port: parse_value(
                    env_vars::HTTP_PORT,
                    &var_or(env_vars::HTTP_PORT, &limits::DEFAULT_HTTP_PORT.to_string()),
                )?,
                max_sessions: parse_value(
                    env_vars::MAX_SESSIONS,
                    &var_or(
                        env_vars::MAX_SESSIONS,
                        &limits::DEFAULT_MAX_SESSIONS.to_string(),
                    ),
                )?,
            },
            cart_path: lookup(env_vars::CART_PATH)
                .filter(|value| !value.trim().is_empty())
                .map_or_else(default_cart_path, PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` naming the first offending setting.
    pub fn validate(&self) -> AppResult<()> {
        if !(self.upstream.base_url.starts_with("http://")
            || self.upstream.base_url.starts_with("https://"))
        {
            return Err(AppError::config_invalid(format!(
                "{} must be an http(s) URL, got '{}'",
                env_vars::API_BASE_URL,
                self.upstream.base_url
            )));
        }

        if self.upstream.timeout_secs == 0 || self.upstream.connect_timeout_secs == 0 {
            return Err(AppError::config_invalid(
                "HTTP timeouts must be at least one second",
            ));
        }

        for (key, value) in [
            (env_vars::RECIPE_BATCH_SIZE, self.engine.recipe_batch_size),
            (env_vars::AUTOCOMPLETE_LIMIT, self.engine.autocomplete_limit),
        ] {
            if value == 0 || value > limits::MAX_UPSTREAM_RESULTS {
                return Err(AppError::config_invalid(format!(
                    "{key} must be between 1 and {}, got {value}",
                    limits::MAX_UPSTREAM_RESULTS
                )));
            }
        }

        if self.server.max_sessions == 0 {
            return Err(AppError::config_invalid(format!(
                "{} must be positive",
                env_vars::MAX_SESSIONS
            )));
        }

        Ok(())
    }

    /// Client configuration for the upstream recipe API
    #[must_use]
    pub fn spoonacular_config(&self) -> SpoonacularConfig {
        SpoonacularConfig::new(self.upstream.credential.clone())
            .with_base_url(self.upstream.base_url.clone())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Larder Configuration:\n\
             - Environment: {}\n\
             - Recipe API: {}\n\
             - API Key: {}\n\
             - Timeouts: {}s request, {}s connect\n\
             - Recipes per search: {}\n\
             - Suggestions per query: {}\n\
             - Server: {}:{}\n\
             - Max sessions: {}\n\
             - Cart file: {}",
            self.environment,
            self.upstream.base_url,
            self.upstream.credential,
            self.upstream.timeout_secs,
            self.upstream.connect_timeout_secs,
            self.engine.recipe_batch_size,
            self.engine.autocomplete_limit,
            self.server.host,
            self.server.http_port,
            self.server.max_sessions,
            self.cart_path.display(),
        )
    }
}

/// Default cart location: `<data dir>/larder/cart.json`
fn default_cart_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("larder")
        .join("cart.json")
}

fn parse_value<T>(key: &str, raw: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e| {
        AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}"))
    })
}
