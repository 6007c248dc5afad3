// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP-backed identity verification.
//!
//! Calls the configured identity service's `/user` endpoint with the
//! caller's bearer token. Any outcome other than a 200 carrying a readable
//! user object is `Unauthorized` -- an unreachable or confused identity
//! service must not admit anyone.

use std::time::Duration;

use async_trait::async_trait;
use hookgate_core::{HookgateError, IdentityVerifier, VerifiedUser};
use tracing::{debug, warn};
use url::Url;

/// Identity verifier backed by a remote identity service.
#[derive(Debug, Clone)]
pub struct HttpIdentityVerifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpIdentityVerifier {
    /// Create a verifier for the identity service at `identity_url`.
    ///
    /// The verification endpoint is `{identity_url}/user`; `timeout` bounds
    /// each verification call.
    pub fn new(identity_url: &str, timeout: Duration) -> Result<Self, HookgateError> {
        let endpoint = Url::parse(&format!("{}/user", identity_url.trim_end_matches('/')))
            .map_err(|e| HookgateError::Config(format!("invalid identity_url: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                HookgateError::Config(format!("failed to build identity client: {e}"))
            })?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify_bearer(&self, token: &str) -> Result<VerifiedUser, HookgateError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                warn!("identity service unreachable: {e}");
                HookgateError::Unauthorized("identity service unreachable".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, "bearer token rejected by identity service");
            return Err(HookgateError::Unauthorized(
                "bearer token was rejected by the identity service".to_string(),
            ));
        }

        response.json::<VerifiedUser>().await.map_err(|e| {
            warn!("identity service returned an unreadable user object: {e}");
            HookgateError::Unauthorized(
                "identity service returned an unreadable user object".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_derived_from_base_url() {
        let verifier =
            HttpIdentityVerifier::new("https://auth.example.com", Duration::from_secs(5))
                .unwrap();
        assert_eq!(verifier.endpoint.as_str(), "https://auth.example.com/user");

        // Trailing slash does not double up.
        let verifier =
            HttpIdentityVerifier::new("https://auth.example.com/", Duration::from_secs(5))
                .unwrap();
        assert_eq!(verifier.endpoint.as_str(), "https://auth.example.com/user");
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = HttpIdentityVerifier::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, HookgateError::Config(_)));
    }
}
