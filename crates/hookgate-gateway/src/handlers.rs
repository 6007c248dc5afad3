// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles POST /v1/dispatch and GET /health.

use std::time::Duration;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hookgate_core::{CallerIdentity, HookgateError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::reject::{ErrorBody, Rejection};
use crate::server::GatewayState;

/// Request body for POST /v1/dispatch.
///
/// Parsed manually from the raw body (not via the `Json` extractor) so that
/// authentication and throttling have already run by the time parse errors
/// can occur.
#[derive(Debug, Deserialize)]
pub struct DispatchRequest {
    /// Absolute https destination URL.
    pub webhook_url: String,
    /// Opaque JSON forwarded verbatim to the destination.
    pub payload: serde_json::Value,
    /// Requested delivery timeout in milliseconds. Defaults from config,
    /// clamped to the egress ceiling by the dispatcher.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Response body for a completed delivery attempt.
#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    /// True iff the destination answered with a 2xx before the timeout.
    pub success: bool,
    /// The destination's HTTP status code.
    pub status: u16,
    /// Human-readable summary of the attempt.
    pub message: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
}

/// POST /v1/dispatch
///
/// The caller has already passed authentication and throttling. Parses the
/// body, validates the destination, and performs the single delivery
/// attempt. A completed attempt is always an outer 200; the body's `success`
/// field reports whether the destination accepted it.
pub async fn post_dispatch(
    State(state): State<GatewayState>,
    Extension(identity): Extension<CallerIdentity>,
    body: Bytes,
) -> Result<Response, Rejection> {
    let request: DispatchRequest = serde_json::from_slice(&body).map_err(|e| {
        Rejection(HookgateError::InvalidRequest(format!(
            "invalid request body: {e}"
        )))
    })?;

    // The validated URL is reused for dispatch: what was checked is what is
    // sent.
    let destination = state.policy.validate(&request.webhook_url)?;

    let timeout = Duration::from_millis(request.timeout_ms.unwrap_or(state.default_timeout_ms));
    let request_id = uuid::Uuid::new_v4();

    info!(
        %request_id,
        caller = %identity,
        host = destination.host_str().unwrap_or(""),
        "dispatching webhook"
    );

    let outcome = state
        .dispatcher
        .deliver(&destination, &request.payload, timeout)
        .await?;

    info!(
        %request_id,
        status = outcome.status,
        accepted = outcome.accepted,
        "dispatch attempt completed"
    );

    let message = if outcome.accepted {
        "webhook delivered".to_string()
    } else {
        format!("destination responded with status {}", outcome.status)
    };

    Ok((
        StatusCode::OK,
        Json(DispatchResponse {
            success: outcome.accepted,
            status: outcome.status,
            message,
        }),
    )
        .into_response())
}

/// GET /health
///
/// Unauthenticated liveness endpoint.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

/// Fallback for non-POST methods on the dispatch route.
///
/// Registered outside the auth middleware: a wrong-method probe gets its
/// 405 without credentials, matching the check order of the gate sequence.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            success: false,
            error: "method not allowed, use POST".to_string(),
        }),
    )
        .into_response()
}
