// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Hookgate workspace.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The authenticated caller of the guard.
///
/// A tagged union rather than two boolean flags: the two paths are mutually
/// exclusive and checked in order (service key first, then bearer token),
/// and an absent service key must never degrade to an unauthenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerIdentity {
    /// A trusted same-system caller holding the shared service key.
    Internal,
    /// An end user resolved from a bearer token by the identity verifier.
    User {
        /// Stable user identifier from the identity service.
        id: String,
    },
}

impl CallerIdentity {
    /// Key under which this caller's requests are counted by the throttle.
    pub fn throttle_key(&self) -> String {
        match self {
            CallerIdentity::Internal => "internal".to_string(),
            CallerIdentity::User { id } => format!("user:{id}"),
        }
    }
}

impl std::fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallerIdentity::Internal => write!(f, "internal"),
            CallerIdentity::User { id } => write!(f, "user {id}"),
        }
    }
}

/// A user identity resolved by an [`IdentityVerifier`](crate::IdentityVerifier).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifiedUser {
    /// Stable user identifier.
    pub id: String,
}

/// The result of one throttle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// The request may proceed.
    Allowed {
        /// Permits remaining in the current window after this one.
        remaining: u32,
    },
    /// The request is rejected for the remainder of the window.
    Throttled {
        /// Time until the window resets and requests are admitted again.
        retry_after: Duration,
    },
}

impl ThrottleDecision {
    /// Whether the checked request may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, ThrottleDecision::Allowed { .. })
    }
}

/// Outcome of a completed delivery attempt.
///
/// Existence of this value means the destination answered before the
/// timeout; whether it *accepted* the webhook is a separate question the
/// caller decides on (`accepted` reflects the 2xx range). Timeouts and
/// transport failures are errors, not outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryOutcome {
    /// HTTP status code the destination responded with.
    pub status: u16,
    /// Whether the status falls in the 2xx success range.
    pub accepted: bool,
}

impl DeliveryOutcome {
    /// Build an outcome from a destination status code.
    pub fn from_status(status: u16) -> Self {
        Self {
            status,
            accepted: (200..300).contains(&status),
        }
    }
}
