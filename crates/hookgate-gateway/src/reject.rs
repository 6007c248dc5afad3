// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from gate failures to HTTP rejections.
//!
//! Every rejection carries a JSON body `{"success": false, "error": ...}`
//! with a stable status code. Internal faults are logged with their detail
//! but surface only a generic message -- no internal state leaves the
//! process in a response body.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use hookgate_core::HookgateError;
use serde::Serialize;

/// JSON body for all non-200 responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always `false` for rejections.
    pub success: bool,
    /// Short human-readable reason.
    pub error: String,
}

/// A gate failure on its way out as an HTTP response.
#[derive(Debug)]
pub struct Rejection(pub HookgateError);

impl From<HookgateError> for Rejection {
    fn from(err: HookgateError) -> Self {
        Self(err)
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            HookgateError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HookgateError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            HookgateError::InvalidRequest(_) | HookgateError::InvalidDestination(_) => {
                StatusCode::BAD_REQUEST
            }
            HookgateError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            HookgateError::DeliveryFailed { .. } => StatusCode::BAD_GATEWAY,
            HookgateError::Config(_) | HookgateError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let error = match &self.0 {
            HookgateError::Unauthorized(reason)
            | HookgateError::InvalidRequest(reason)
            | HookgateError::InvalidDestination(reason) => reason.clone(),
            HookgateError::RateLimited { .. } => {
                "Rate limit exceeded, please slow down".to_string()
            }
            HookgateError::Timeout { duration } => {
                format!("Webhook request timed out after {}ms", duration.as_millis())
            }
            HookgateError::DeliveryFailed { message, .. } => message.clone(),
            HookgateError::Config(_) | HookgateError::Internal(_) => {
                tracing::error!("request failed with internal fault: {}", self.0);
                "internal error".to_string()
            }
        };

        let mut response = (
            status,
            Json(ErrorBody {
                success: false,
                error,
            }),
        )
            .into_response();

        if let HookgateError::RateLimited { retry_after } = &self.0 {
            // Whole seconds, rounded up, so a client sleeping the advertised
            // time always lands in the next window.
            let secs = retry_after.as_secs_f64().ceil() as u64;
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }

        response
    }
}
