// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Hookgate egress guard.

use std::time::Duration;

use thiserror::Error;

/// The primary error type used across all Hookgate gates and adapter traits.
///
/// Every gate fails closed: ambiguity (unparseable URL, absent header,
/// unreachable identity service) surfaces as one of these variants, never
/// as a pass-through.
#[derive(Debug, Error)]
pub enum HookgateError {
    /// Caller presented no usable credential, or the credential was rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller exceeded its per-identity request budget for the current window.
    #[error("rate limit exceeded, retry after {retry_after:?}")]
    RateLimited {
        /// Time remaining until the caller's window resets.
        retry_after: Duration,
    },

    /// Request body was malformed or missing a required field.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Destination URL failed scheme, blocked-address, or allowlist checks.
    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    /// Outbound delivery did not complete within its bound.
    #[error("delivery timed out after {duration:?}")]
    Timeout {
        /// The effective (clamped) timeout that was applied.
        duration: Duration,
    },

    /// Outbound delivery failed at the transport level (DNS, connect, TLS).
    #[error("delivery failed: {message}")]
    DeliveryFailed {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (invalid values, unbuildable clients).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
