// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory counter store for single-instance deployments.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use hookgate_core::{HookgateError, ThrottleDecision, ThrottleStore};
use tokio::time::Instant;

/// One identity's counter for the current window.
#[derive(Debug, Clone, Copy)]
struct WindowSlot {
    count: u32,
    reset_at: Instant,
}

/// Process-local `ThrottleStore` backed by a concurrent map.
///
/// Counters are keyed by identity and mutated under the map's per-key entry
/// lock, so concurrent requests from the same identity serialize on their
/// own counter without a global lock. Expired slots are overwritten in place
/// on the next hit; there is no background eviction, so the map grows with
/// distinct identity cardinality.
#[derive(Debug, Default)]
pub struct MemoryThrottleStore {
    windows: DashMap<String, WindowSlot>,
}

impl MemoryThrottleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities currently tracked.
    pub fn tracked_identities(&self) -> usize {
        self.windows.len()
    }
}

#[async_trait]
impl ThrottleStore for MemoryThrottleStore {
    async fn hit(
        &self,
        key: &str,
        limit: u32,
        window: Duration,
    ) -> Result<ThrottleDecision, HookgateError> {
        let now = Instant::now();
        let mut slot = self
            .windows
            .entry(key.to_string())
            .or_insert(WindowSlot {
                count: 0,
                reset_at: now + window,
            });

        // Window expired: restart it with this request as the first hit.
        if now >= slot.reset_at {
            slot.count = 1;
            slot.reset_at = now + window;
            return Ok(ThrottleDecision::Allowed {
                remaining: limit.saturating_sub(1),
            });
        }

        // Live window at capacity: reject without incrementing further.
        if slot.count >= limit {
            return Ok(ThrottleDecision::Throttled {
                retry_after: slot.reset_at - now,
            });
        }

        slot.count += 1;
        Ok(ThrottleDecision::Allowed {
            remaining: limit - slot.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn admits_exactly_limit_within_window() {
        let store = MemoryThrottleStore::new();
        for i in 0..10 {
            let decision = store.hit("user:u-1", 10, WINDOW).await.unwrap();
            assert!(decision.is_allowed(), "call {i} should be allowed");
        }
        let decision = store.hit("user:u-1", 10, WINDOW).await.unwrap();
        assert!(!decision.is_allowed(), "11th call should be throttled");
    }

    #[tokio::test(start_paused = true)]
    async fn remaining_counts_down() {
        let store = MemoryThrottleStore::new();
        let first = store.hit("k", 3, WINDOW).await.unwrap();
        assert_eq!(first, ThrottleDecision::Allowed { remaining: 2 });
        let second = store.hit("k", 3, WINDOW).await.unwrap();
        assert_eq!(second, ThrottleDecision::Allowed { remaining: 1 });
        let third = store.hit("k", 3, WINDOW).await.unwrap();
        assert_eq!(third, ThrottleDecision::Allowed { remaining: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn window_expiry_resets_the_counter() {
        let store = MemoryThrottleStore::new();
        for _ in 0..10 {
            store.hit("k", 10, WINDOW).await.unwrap();
        }
        assert!(!store.hit("k", 10, WINDOW).await.unwrap().is_allowed());

        // Just past the reset boundary the counter restarts at 1.
        tokio::time::advance(WINDOW + Duration::from_millis(1)).await;
        let decision = store.hit("k", 10, WINDOW).await.unwrap();
        assert_eq!(decision, ThrottleDecision::Allowed { remaining: 9 });
    }

    #[tokio::test(start_paused = true)]
    async fn reset_exactly_at_boundary_admits() {
        let store = MemoryThrottleStore::new();
        store.hit("k", 1, WINDOW).await.unwrap();
        assert!(!store.hit("k", 1, WINDOW).await.unwrap().is_allowed());

        // `now >= reset_at` reopens the window, boundary inclusive.
        tokio::time::advance(WINDOW).await;
        assert!(store.hit("k", 1, WINDOW).await.unwrap().is_allowed());
    }

    #[tokio::test(start_paused = true)]
    async fn throttled_calls_do_not_extend_the_window() {
        let store = MemoryThrottleStore::new();
        store.hit("k", 1, WINDOW).await.unwrap();

        // Hammering a throttled key must not push the reset time out.
        tokio::time::advance(Duration::from_secs(59)).await;
        let decision = store.hit("k", 1, WINDOW).await.unwrap();
        let ThrottleDecision::Throttled { retry_after } = decision else {
            panic!("expected throttled, got {decision:?}");
        };
        assert!(retry_after <= Duration::from_secs(1));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(store.hit("k", 1, WINDOW).await.unwrap().is_allowed());
    }

    #[tokio::test(start_paused = true)]
    async fn identities_are_counted_independently() {
        let store = MemoryThrottleStore::new();
        for _ in 0..5 {
            store.hit("user:a", 5, WINDOW).await.unwrap();
        }
        assert!(!store.hit("user:a", 5, WINDOW).await.unwrap().is_allowed());
        assert!(store.hit("user:b", 5, WINDOW).await.unwrap().is_allowed());
        assert!(store.hit("internal", 5, WINDOW).await.unwrap().is_allowed());
        assert_eq!(store.tracked_identities(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn boundary_straddle_admits_up_to_double_limit() {
        // Fixed-window arithmetic: a burst at the end of one window plus a
        // burst at the start of the next admits 2N across the boundary.
        let store = MemoryThrottleStore::new();
        for _ in 0..5 {
            assert!(store.hit("k", 5, WINDOW).await.unwrap().is_allowed());
        }
        tokio::time::advance(WINDOW).await;
        for _ in 0..5 {
            assert!(store.hit("k", 5, WINDOW).await.unwrap().is_allowed());
        }
        assert!(!store.hit("k", 5, WINDOW).await.unwrap().is_allowed());
    }
}
