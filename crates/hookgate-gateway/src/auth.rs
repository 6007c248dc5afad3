// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication middleware for the dispatch route.
//!
//! Runs first in the gate order. On success the resolved [`CallerIdentity`]
//! is attached to the request extensions for the throttle middleware and the
//! handler; on failure the request is rejected with 401 before any other
//! gate runs.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use hookgate_core::CallerIdentity;
use hookgate_security::redact;
use tracing::debug;

use crate::reject::Rejection;
use crate::server::GatewayState;

/// Middleware resolving the caller's credentials to a [`CallerIdentity`].
pub async fn require_caller(
    State(state): State<GatewayState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Rejection> {
    let api_key = request
        .headers()
        .get("apikey")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    match state
        .authenticator
        .authenticate(api_key.as_deref(), authorization.as_deref())
        .await
    {
        Ok(identity) => {
            debug!(caller = %identity, "caller authenticated");
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        Err(err) => {
            if let Some(header_value) = &authorization {
                debug!(
                    authorization = %redact(header_value, &[]),
                    "authentication rejected"
                );
            }
            Err(Rejection(err))
        }
    }
}
