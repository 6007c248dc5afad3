// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound webhook delivery for the Hookgate egress guard.
//!
//! One POST per invocation, nothing more: no retries, no backoff, no
//! redirect following (disabled on the egress client). The caller-requested
//! timeout is clamped to a hard ceiling so a slow destination cannot hold
//! resources indefinitely. "Delivered" means the destination answered
//! before the timeout; what it answered is reported, not judged.

use std::time::Duration;

use async_trait::async_trait;
use hookgate_core::{DeliveryOutcome, HookgateError, WebhookDeliverer};
use reqwest::header;
use tracing::{debug, warn};
use url::Url;

/// Reqwest-backed [`WebhookDeliverer`].
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    user_agent: String,
    max_timeout: Duration,
}

impl HttpDispatcher {
    /// Create a dispatcher sending through `client`.
    ///
    /// `max_timeout` is the ceiling applied to every delivery regardless of
    /// what the caller requests.
    pub fn new(client: reqwest::Client, user_agent: String, max_timeout: Duration) -> Self {
        Self {
            client,
            user_agent,
            max_timeout,
        }
    }

    /// Clamp a caller-requested timeout to the configured ceiling.
    pub fn effective_timeout(&self, requested: Duration) -> Duration {
        requested.min(self.max_timeout)
    }
}

#[async_trait]
impl WebhookDeliverer for HttpDispatcher {
    async fn deliver(
        &self,
        destination: &Url,
        payload: &serde_json::Value,
        timeout: Duration,
    ) -> Result<DeliveryOutcome, HookgateError> {
        let timeout = self.effective_timeout(timeout);

        let result = self
            .client
            .post(destination.clone())
            .header(header::USER_AGENT, &self.user_agent)
            .timeout(timeout)
            .json(payload)
            .send()
            .await;

        match result {
            Ok(response) => {
                let outcome = DeliveryOutcome::from_status(response.status().as_u16());
                debug!(
                    host = destination.host_str().unwrap_or(""),
                    status = outcome.status,
                    accepted = outcome.accepted,
                    "webhook delivery completed"
                );
                Ok(outcome)
            }
            Err(e) if e.is_timeout() => {
                warn!(
                    host = destination.host_str().unwrap_or(""),
                    timeout_ms = timeout.as_millis() as u64,
                    "webhook delivery timed out"
                );
                Err(HookgateError::Timeout { duration: timeout })
            }
            Err(e) => {
                warn!(
                    host = destination.host_str().unwrap_or(""),
                    "webhook delivery failed: {e}"
                );
                Err(HookgateError::DeliveryFailed {
                    message: "could not reach destination".to_string(),
                    source: Some(Box::new(e)),
                })
            }
        }
    }
}
