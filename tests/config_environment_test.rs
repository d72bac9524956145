// ABOUTME: Integration tests for environment-based configuration loading
// ABOUTME: Serialized because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use larder::config::{Environment, LarderConfig};
use larder::constants::env_vars;
use larder::errors::ErrorCode;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const ALL_VARS: &[&str] = &[
    env_vars::API_KEY,
    env_vars::API_BASE_URL,
    env_vars::HTTP_TIMEOUT_SECS,
    env_vars::CONNECT_TIMEOUT_SECS,
    env_vars::RECIPE_BATCH_SIZE,
    env_vars::AUTOCOMPLETE_LIMIT,
    env_vars::HOST,
    env_vars::HTTP_PORT,
    env_vars::MAX_SESSIONS,
    env_vars::CART_PATH,
    env_vars::ENVIRONMENT,
];

fn reset_env() {
    common::init_test_logging();
    for key in ALL_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_missing_api_key_is_reported() {
    reset_env();

    let err = LarderConfig::from_env().unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigMissing);
    assert!(err.message.contains(env_vars::API_KEY));
}

#[test]
#[serial]
fn test_blank_api_key_is_reported() {
    reset_env();
    env::set_var(env_vars::API_KEY, "   ");

    let err = LarderConfig::from_env().unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigMissing);
    reset_env();
}

#[test]
#[serial]
fn test_defaults_with_only_api_key() {
    reset_env();
    env::set_var(env_vars::API_KEY, "test-key");

    let config = LarderConfig::from_env().unwrap();

    assert_eq!(config.upstream.credential.expose(), "test-key");
    assert_eq!(config.upstream.base_url, "https://api.spoonacular.com");
    assert_eq!(config.engine.recipe_batch_size, 30);
    assert_eq!(config.engine.autocomplete_limit, 8);
    assert_eq!(config.server.max_sessions, 1024);
    assert_eq!(config.environment, Environment::Development);
    assert!(config.cart_path.ends_with("larder/cart.json"));
    reset_env();
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    reset_env();
    env::set_var(env_vars::API_KEY, "test-key");
    env::set_var(env_vars::API_BASE_URL, "http://127.0.0.1:9000/");
    env::set_var(env_vars::RECIPE_BATCH_SIZE, "10");
    env::set_var(env_vars::HTTP_PORT, "9090");
    env::set_var(env_vars::CART_PATH, "/tmp/larder-test/cart.json");
    env::set_var(env_vars::ENVIRONMENT, "production");

    let config = LarderConfig::from_env().unwrap();

    assert_eq!(config.upstream.base_url, "http://127.0.0.1:9000");
    assert_eq!(config.engine.recipe_batch_size, 10);
    assert_eq!(config.server.http_port, 9090);
    assert_eq!(config.cart_path, PathBuf::from("/tmp/larder-test/cart.json"));
    assert!(config.environment.is_production());
    assert_eq!(config.spoonacular_config().base_url, "http://127.0.0.1:9000");
    reset_env();
}

#[test]
#[serial]
fn test_unparsable_number_is_invalid() {
    reset_env();
    env::set_var(env_vars::API_KEY, "test-key");
    env::set_var(env_vars::HTTP_TIMEOUT_SECS, "soon");

    let err = LarderConfig::from_env().unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains(env_vars::HTTP_TIMEOUT_SECS));
    reset_env();
}

#[test]
#[serial]
fn test_out_of_range_values_are_invalid() {
    for (key, value) in [
        (env_vars::RECIPE_BATCH_SIZE, "0"),
        (env_vars::AUTOCOMPLETE_LIMIT, "101"),
        (env_vars::MAX_SESSIONS, "0"),
        (env_vars::API_BASE_URL, "ftp://example.com"),
    ] {
        reset_env();
        env::set_var(env_vars::API_KEY, "test-key");
        env::set_var(key, value);

        let err = LarderConfig::from_env().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid, "{key}={value}");
    }
    reset_env();
}

#[test]
#[serial]
fn test_summary_never_prints_the_key() {
    reset_env();
    env::set_var(env_vars::API_KEY, "very-secret-key");

    let summary = LarderConfig::from_env().unwrap().summary();

    assert!(!summary.contains("very-secret-key"));
    assert!(summary.contains("***"));
    reset_env();
}
