// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hookgate serve` command implementation.
//!
//! Wires the configured gates together -- authenticator, fixed-window
//! limiter, destination policy, hardened egress dispatcher -- and runs the
//! gateway server until SIGINT/SIGTERM, draining connections on shutdown.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use hookgate_auth::{Authenticator, HttpIdentityVerifier};
use hookgate_config::HookgateConfig;
use hookgate_core::{HookgateError, IdentityVerifier};
use hookgate_dispatch::HttpDispatcher;
use hookgate_gateway::{GatewayState, HealthState, start_server};
use hookgate_security::{DestinationPolicy, RedactingWriter, build_egress_client};
use hookgate_throttle::{FixedWindowLimiter, MemoryThrottleStore};
use secrecy::SecretString;
use tracing::{info, warn};

/// Runs the `hookgate serve` command.
pub async fn run_serve(config: HookgateConfig) -> Result<(), HookgateError> {
    init_tracing(&config);

    if config.auth.service_key.is_none() && config.auth.identity_url.is_none() {
        warn!("no authentication path configured -- every request will be rejected");
    }

    let verifier: Option<Arc<dyn IdentityVerifier>> = match &config.auth.identity_url {
        Some(identity_url) => Some(Arc::new(HttpIdentityVerifier::new(
            identity_url,
            Duration::from_millis(config.auth.verify_timeout_ms),
        )?)),
        None => None,
    };
    let service_key = config.auth.service_key.clone().map(SecretString::from);
    let authenticator = Authenticator::new(service_key, verifier);

    let limiter = FixedWindowLimiter::new(
        Arc::new(MemoryThrottleStore::new()),
        config.throttle.max_requests,
        Duration::from_secs(config.throttle.window_secs),
    );

    let policy = DestinationPolicy::new(config.egress.allowed_domains.clone());
    let client = build_egress_client(config.egress.allowed_private_ips.clone())?;
    let dispatcher = HttpDispatcher::new(
        client,
        config.egress.user_agent.clone(),
        Duration::from_millis(config.egress.max_timeout_ms),
    );

    info!(
        allowed_domains = ?policy.allowed_domains(),
        limit = config.throttle.max_requests,
        window_secs = config.throttle.window_secs,
        "egress policy loaded"
    );

    let state = GatewayState {
        authenticator: Arc::new(authenticator),
        limiter,
        policy: Arc::new(policy),
        dispatcher: Arc::new(dispatcher),
        default_timeout_ms: config.egress.default_timeout_ms,
        health: HealthState {
            start_time: std::time::Instant::now(),
        },
    };

    start_server(
        &config.server.host,
        config.server.port,
        state,
        shutdown_signal(),
    )
    .await?;

    info!("hookgate shutdown complete");
    Ok(())
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}

/// Initializes the tracing subscriber.
///
/// Output passes through a redacting writer so the service key and bearer
/// tokens never reach the logs in the clear.
fn init_tracing(config: &HookgateConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("hookgate={},warn", config.server.log_level))
    });

    let secrets = Arc::new(RwLock::new(
        config.auth.service_key.iter().cloned().collect::<Vec<_>>(),
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), Arc::clone(&secrets)))
        .init();
}
