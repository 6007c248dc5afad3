// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller authentication.
//!
//! Two credential paths, checked in order:
//! 1. Service key (`apikey` header) -- trusted same-system callers such as
//!    other backend functions or scheduled jobs. No token verification.
//! 2. Bearer token (`Authorization: Bearer <token>`) -- end users, resolved
//!    through the configured [`IdentityVerifier`].
//!
//! When neither path is configured, all requests are rejected (fail-closed).
//! A present-but-wrong service key falls through to the bearer path rather
//! than being treated as an unauthenticated pass.

use std::sync::Arc;

use hookgate_core::{CallerIdentity, HookgateError, IdentityVerifier};
use secrecy::{ExposeSecret, SecretString};

/// Resolves inbound credentials to a [`CallerIdentity`].
pub struct Authenticator {
    service_key: Option<SecretString>,
    verifier: Option<Arc<dyn IdentityVerifier>>,
}

impl Authenticator {
    /// Create an authenticator from the configured credential paths.
    pub fn new(
        service_key: Option<SecretString>,
        verifier: Option<Arc<dyn IdentityVerifier>>,
    ) -> Self {
        Self {
            service_key,
            verifier,
        }
    }

    /// Authenticate a request from its `apikey` and `Authorization` header
    /// values.
    pub async fn authenticate(
        &self,
        api_key: Option<&str>,
        authorization: Option<&str>,
    ) -> Result<CallerIdentity, HookgateError> {
        // If neither path is configured, reject all requests (fail-closed).
        if self.service_key.is_none() && self.verifier.is_none() {
            tracing::error!("no authentication path configured -- rejecting request");
            return Err(HookgateError::Unauthorized(
                "authentication is not configured".to_string(),
            ));
        }

        // Priority 1: service key (fast path -- string comparison).
        if let Some(expected) = &self.service_key
            && let Some(provided) = api_key
            && provided == expected.expose_secret()
        {
            return Ok(CallerIdentity::Internal);
        }

        // Priority 2: bearer token through the identity verifier.
        let Some(verifier) = &self.verifier else {
            return Err(HookgateError::Unauthorized(
                "bearer authentication is not configured".to_string(),
            ));
        };

        let token = authorization
            .and_then(|v| v.strip_prefix("Bearer "))
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                HookgateError::Unauthorized(
                    "missing bearer authorization header".to_string(),
                )
            })?;

        let user = verifier.verify_bearer(token).await?;
        Ok(CallerIdentity::User { id: user.id })
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field(
                "service_key",
                &self.service_key.as_ref().map(|_| "[redacted]"),
            )
            .field("verifier", &self.verifier.is_some())
            .finish()
    }
}
