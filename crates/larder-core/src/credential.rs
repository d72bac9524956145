// ABOUTME: API credential wrapper validated at configuration load
// ABOUTME: Keeps the key out of Debug output and log lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use crate::errors::{AppError, ErrorCode};

/// API key for the upstream recipe API
///
/// Constructed once at startup and injected into the client. `Debug` and
/// `Display` never print the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Validate a raw key value
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ConfigMissing` when the value is absent or blank.
    pub fn new(raw: Option<String>) -> Result<Self, AppError> {
        match raw.map(|value| value.trim().to_owned()) {
            Some(value) if !value.is_empty() => Ok(Self(value)),
            _ => Err(AppError::new(
                ErrorCode::ConfigMissing,
                "API key is missing: supply it through the LARDER_API_KEY environment variable",
            )),
        }
    }

    /// Raw key for request signing
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}

impl fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}
