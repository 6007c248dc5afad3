// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-window rate limiting for the Hookgate egress guard.
//!
//! The limiter admits up to `N` requests per identity per window of length
//! `W`, counting in fixed windows: the counter restarts when a window
//! expires, so a burst straddling a boundary can admit up to `2N` requests.
//! That imprecision is part of the observable contract and is deliberately
//! not replaced with sliding-window accounting.
//!
//! Counter storage sits behind [`ThrottleStore`]; the in-memory
//! [`MemoryThrottleStore`] is the default for single-instance deployments.

pub mod memory;

use std::sync::Arc;
use std::time::Duration;

use hookgate_core::{HookgateError, ThrottleDecision, ThrottleStore};

pub use memory::MemoryThrottleStore;

/// Per-identity fixed-window rate limiter.
#[derive(Clone)]
pub struct FixedWindowLimiter {
    store: Arc<dyn ThrottleStore>,
    limit: u32,
    window: Duration,
}

impl FixedWindowLimiter {
    /// Create a limiter admitting `limit` requests per `window` per identity.
    pub fn new(store: Arc<dyn ThrottleStore>, limit: u32, window: Duration) -> Self {
        Self {
            store,
            limit,
            window,
        }
    }

    /// Record one request for `key` and decide whether it may proceed.
    pub async fn check(&self, key: &str) -> Result<ThrottleDecision, HookgateError> {
        self.store.hit(key, self.limit, self.window).await
    }

    /// The configured per-window limit.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// The configured window length.
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl std::fmt::Debug for FixedWindowLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedWindowLimiter")
            .field("limit", &self.limit)
            .field("window", &self.window)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn limiter_delegates_to_store() {
        let limiter = FixedWindowLimiter::new(
            Arc::new(MemoryThrottleStore::new()),
            2,
            Duration::from_secs(60),
        );
        assert!(limiter.check("internal").await.unwrap().is_allowed());
        assert!(limiter.check("internal").await.unwrap().is_allowed());
        assert!(!limiter.check("internal").await.unwrap().is_allowed());
    }

    #[tokio::test(start_paused = true)]
    async fn throttled_decision_reports_window_remainder() {
        let window = Duration::from_secs(60);
        let limiter =
            FixedWindowLimiter::new(Arc::new(MemoryThrottleStore::new()), 1, window);
        limiter.check("k").await.unwrap();

        let decision = limiter.check("k").await.unwrap();
        let ThrottleDecision::Throttled { retry_after } = decision else {
            panic!("expected throttled, got {decision:?}");
        };
        assert!(retry_after <= window);
        assert!(retry_after > Duration::ZERO);
    }
}
