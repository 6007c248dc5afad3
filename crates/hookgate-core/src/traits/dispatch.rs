// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery trait for the outbound dispatch gate.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::HookgateError;
use crate::types::DeliveryOutcome;

/// Performs the single outbound POST of a validated webhook.
///
/// At-most-one attempt: implementations never retry. An `Ok` outcome means
/// the destination answered before the timeout, whatever its status code;
/// timeouts and transport failures are distinct error variants so the
/// gateway can map them to different rejection codes.
#[async_trait]
pub trait WebhookDeliverer: Send + Sync {
    /// Delivers `payload` to the already-validated `destination`.
    ///
    /// `timeout` is the caller-requested bound; implementations clamp it to
    /// their configured ceiling before applying it.
    async fn deliver(
        &self,
        destination: &Url,
        payload: &serde_json::Value,
        timeout: Duration,
    ) -> Result<DeliveryOutcome, HookgateError>;
}
