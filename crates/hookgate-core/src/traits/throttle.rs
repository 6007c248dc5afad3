// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Counter-store trait backing the fixed-window rate limiter.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::HookgateError;
use crate::types::ThrottleDecision;

/// Storage backend for per-identity request counters.
///
/// The in-memory store is the default for single-instance deployments.
/// Deployments that need a cross-instance-accurate limit supply a backend
/// over a shared counter store instead; each instance otherwise enforces
/// the limit independently.
#[async_trait]
pub trait ThrottleStore: Send + Sync {
    /// Records one request against `key` and decides whether it may proceed.
    ///
    /// Fixed-window contract: on first observation of a key, or once the
    /// current window has expired, the counter restarts at 1 and the request
    /// is allowed. Within a live window the counter increments up to `limit`;
    /// requests beyond that are throttled without further increments.
    async fn hit(
        &self,
        key: &str,
        limit: u32,
        window: Duration,
    ) -> Result<ThrottleDecision, HookgateError>;
}
