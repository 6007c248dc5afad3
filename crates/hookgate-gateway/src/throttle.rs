// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Throttle middleware for the dispatch route.
//!
//! Runs immediately after authentication and before the body is parsed, so
//! malformed requests still consume throttle budget. Keys on the identity
//! the auth middleware resolved.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use hookgate_core::{CallerIdentity, HookgateError, ThrottleDecision};
use tracing::{debug, warn};

use crate::reject::Rejection;
use crate::server::GatewayState;

/// Middleware enforcing the per-identity fixed-window limit.
pub async fn enforce_throttle(
    State(state): State<GatewayState>,
    request: Request,
    next: Next,
) -> Result<Response, Rejection> {
    let identity = request
        .extensions()
        .get::<CallerIdentity>()
        .cloned()
        .ok_or_else(|| {
            Rejection(HookgateError::Internal(
                "caller identity missing from request extensions".to_string(),
            ))
        })?;

    match state.limiter.check(&identity.throttle_key()).await? {
        ThrottleDecision::Allowed { remaining } => {
            debug!(caller = %identity, remaining, "throttle check passed");
            Ok(next.run(request).await)
        }
        ThrottleDecision::Throttled { retry_after } => {
            warn!(caller = %identity, "request throttled");
            Err(Rejection(HookgateError::RateLimited { retry_after }))
        }
    }
}
