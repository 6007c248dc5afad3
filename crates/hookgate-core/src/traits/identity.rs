// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity verification trait for the bearer-token auth path.

use async_trait::async_trait;

use crate::error::HookgateError;
use crate::types::VerifiedUser;

/// Resolves a bearer token to a verified user.
///
/// The production implementation calls an external identity service; tests
/// substitute a mock. Implementations must fail closed: any ambiguity
/// (expired, malformed, unreachable verifier) is an `Unauthorized` error,
/// never a pass-through.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verifies the given bearer token (without the `Bearer ` prefix) and
    /// returns the resolved user.
    async fn verify_bearer(&self, token: &str) -> Result<VerifiedUser, HookgateError>;
}
