// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Hookgate webhook egress guard.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Hookgate workspace. The gate pipeline
//! (authenticate, throttle, validate, dispatch) is composed from adapters
//! implementing the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HookgateError;
pub use types::{CallerIdentity, DeliveryOutcome, ThrottleDecision, VerifiedUser};

// Re-export all adapter traits at crate root.
pub use traits::{IdentityVerifier, ThrottleStore, WebhookDeliverer};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn hookgate_error_has_all_variants() {
        // Verify all 8 error variants exist and can be constructed.
        let _unauthorized = HookgateError::Unauthorized("test".into());
        let _rate_limited = HookgateError::RateLimited {
            retry_after: Duration::from_secs(30),
        };
        let _invalid_request = HookgateError::InvalidRequest("test".into());
        let _invalid_destination = HookgateError::InvalidDestination("test".into());
        let _timeout = HookgateError::Timeout {
            duration: Duration::from_secs(30),
        };
        let _delivery_failed = HookgateError::DeliveryFailed {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _config = HookgateError::Config("test".into());
        let _internal = HookgateError::Internal("test".into());
    }

    #[test]
    fn error_messages_are_stable() {
        // Reason strings surface to HTTP callers; keep them short and fixed.
        let err = HookgateError::Unauthorized("missing bearer token".into());
        assert_eq!(err.to_string(), "unauthorized: missing bearer token");

        let err = HookgateError::InvalidDestination("Only HTTPS URLs are allowed".into());
        assert_eq!(
            err.to_string(),
            "invalid destination: Only HTTPS URLs are allowed"
        );
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // If any trait module is missing or fails to compile, this won't build.
        fn _assert_verifier<T: IdentityVerifier>() {}
        fn _assert_store<T: ThrottleStore>() {}
        fn _assert_deliverer<T: WebhookDeliverer>() {}
    }
}
