// ABOUTME: Structured error types for upstream recipe API calls
// ABOUTME: Separates credential rejection, transport failure, HTTP errors and malformed bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ErrorCode;

/// Failure of a single upstream API call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// HTTP 401: the API key was rejected; the body is unusable
    #[error("{provider} rejected the API key (HTTP 401)")]
    Unauthorized {
        /// Provider name
        provider: String,
    },

    /// Any other non-success HTTP status
    #[error("{provider} API error ({status_code}): {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status returned
        status_code: u16,
        /// Response text or summary
        message: String,
        /// Whether the status suggests a retry may succeed
        retryable: bool,
    },

    /// Connection, TLS or timeout failure before a response arrived
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response body did not match the expected records
    #[error("Failed to parse {provider} response: {reason}")]
    ParseError {
        /// Provider name
        provider: String,
        /// Decoder message
        reason: String,
    },
}

impl ProviderError {
    /// Error code this failure maps to
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Unauthorized { .. } => ErrorCode::ExternalAuthFailed,
            Self::ApiError { .. } => ErrorCode::ExternalServiceError,
            Self::NetworkError(_) => ErrorCode::ExternalServiceUnavailable,
            Self::ParseError { .. } => ErrorCode::UpstreamDataInvalid,
        }
    }

    /// Whether retrying the same request may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError { retryable, .. } => *retryable,
            Self::NetworkError(_) => true,
            Self::Unauthorized { .. } | Self::ParseError { .. } => false,
        }
    }

    /// Whether this is an HTTP 401 credential rejection
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Result alias for upstream API calls
pub type ProviderResult<T> = Result<T, ProviderError>;
