// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock identity verifier for deterministic testing.
//!
//! `MockVerifier` implements `IdentityVerifier` with a fixed token-to-user
//! table, enabling fast, CI-runnable tests without an identity service.

use std::collections::HashMap;

use async_trait::async_trait;
use hookgate_core::{HookgateError, IdentityVerifier, VerifiedUser};

/// An identity verifier that accepts a fixed set of tokens.
///
/// Unknown tokens are rejected as `Unauthorized`, mirroring the fail-closed
/// behavior of the production verifier.
#[derive(Debug, Default)]
pub struct MockVerifier {
    tokens: HashMap<String, String>,
}

impl MockVerifier {
    /// Create a verifier that rejects every token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as belonging to `user_id`.
    pub fn with_token(mut self, token: &str, user_id: &str) -> Self {
        self.tokens.insert(token.to_string(), user_id.to_string());
        self
    }
}

#[async_trait]
impl IdentityVerifier for MockVerifier {
    async fn verify_bearer(&self, token: &str) -> Result<VerifiedUser, HookgateError> {
        match self.tokens.get(token) {
            Some(id) => Ok(VerifiedUser { id: id.clone() }),
            None => Err(HookgateError::Unauthorized(
                "bearer token was rejected by the identity service".to_string(),
            )),
        }
    }
}
