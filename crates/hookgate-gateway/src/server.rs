// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. The gate order is encoded
//! structurally: authentication and throttling are route middleware layered
//! outside the dispatch handler, so they always run (in that order) before
//! the body is touched.

use std::sync::Arc;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use hookgate_auth::Authenticator;
use hookgate_core::{HookgateError, WebhookDeliverer};
use hookgate_security::DestinationPolicy;
use hookgate_throttle::FixedWindowLimiter;
use tower_http::cors::CorsLayer;

use crate::{auth, handlers, throttle};

/// State for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers and middleware.
#[derive(Clone)]
pub struct GatewayState {
    /// Resolves caller credentials to identities.
    pub authenticator: Arc<Authenticator>,
    /// Per-identity fixed-window limiter.
    pub limiter: FixedWindowLimiter,
    /// Destination allowlist/blocklist policy.
    pub policy: Arc<DestinationPolicy>,
    /// Performs the outbound delivery.
    pub dispatcher: Arc<dyn WebhookDeliverer>,
    /// Timeout applied when the caller does not request one, in milliseconds.
    pub default_timeout_ms: u64,
    /// Health state for unauthenticated endpoints.
    pub health: HealthState,
}

/// Assemble the gateway router.
///
/// Split out from [`start_server`] so tests can drive the router directly.
pub fn build_router(state: GatewayState) -> Router {
    // Unauthenticated public routes.
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    // The dispatch route. Middleware applies to the POST handler only; the
    // method fallback answers wrong-method probes without credentials.
    let api_routes = Router::new()
        .route(
            "/v1/dispatch",
            post(handlers::post_dispatch)
                .fallback(handlers::method_not_allowed)
                .route_layer(axum_middleware::from_fn_with_state(
                    state.clone(),
                    throttle::enforce_throttle,
                ))
                .route_layer(axum_middleware::from_fn_with_state(
                    state.clone(),
                    auth::require_caller,
                )),
        )
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
}

/// Bind and serve the gateway until `shutdown` resolves.
pub async fn start_server(
    host: &str,
    port: u16,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), HookgateError> {
    let app = build_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HookgateError::Config(format!("failed to bind to {addr}: {e}")))?;

    tracing::info!("hookgate listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| HookgateError::Internal(format!("server error: {e}")))
}
