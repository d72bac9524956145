// ABOUTME: Configuration management module for the Larder binaries
// ABOUTME: Re-exports the environment-backed configuration types
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Configuration module
//!
//! - **Environment**: upstream API, engine sizes, server binding and cart location

/// Environment and server configuration
pub mod environment;

pub use environment::{EngineSettings, Environment, LarderConfig, ServerSettings, UpstreamConfig};
