// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Hookgate egress guard.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Hookgate configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HookgateConfig {
    /// HTTP server bind settings and logging.
    #[serde(default)]
    pub server: ServerConfig,

    /// Caller authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Per-identity rate limiting settings.
    #[serde(default)]
    pub throttle: ThrottleConfig,

    /// Outbound delivery policy settings.
    #[serde(default)]
    pub egress: EgressConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Caller authentication configuration.
///
/// Both paths are optional in config but at least one must be configured for
/// the server to admit any request (the authenticator fails closed).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Shared service key granting the trusted internal caller path.
    /// `None` disables the internal path.
    #[serde(default)]
    pub service_key: Option<String>,

    /// Base URL of the identity service that resolves bearer tokens.
    /// `None` disables the end-user path.
    #[serde(default)]
    pub identity_url: Option<String>,

    /// Timeout for identity verification calls, in milliseconds.
    #[serde(default = "default_verify_timeout_ms")]
    pub verify_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            service_key: None,
            identity_url: None,
            verify_timeout_ms: default_verify_timeout_ms(),
        }
    }
}

fn default_verify_timeout_ms() -> u64 {
    5_000
}

/// Per-identity rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ThrottleConfig {
    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Maximum requests admitted per identity per window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
        }
    }
}

fn default_window_secs() -> u64 {
    60
}

fn default_max_requests() -> u32 {
    10
}

/// Outbound delivery policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EgressConfig {
    /// Webhook provider domains deliveries may target. A destination host
    /// must equal an entry or be a subdomain of one.
    #[serde(default = "default_allowed_domains")]
    pub allowed_domains: Vec<String>,

    /// Timeout applied when the caller does not request one, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    /// Hard ceiling on the per-delivery timeout, in milliseconds.
    /// Caller-requested values above this are clamped.
    #[serde(default = "default_max_timeout_ms")]
    pub max_timeout_ms: u64,

    /// Private IP addresses exempt from SSRF blocking at connect time
    /// (e.g., a local destination in a dev deployment).
    #[serde(default)]
    pub allowed_private_ips: Vec<String>,

    /// User-Agent header sent on outbound deliveries.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for EgressConfig {
    fn default() -> Self {
        Self {
            allowed_domains: default_allowed_domains(),
            default_timeout_ms: default_timeout_ms(),
            max_timeout_ms: default_max_timeout_ms(),
            allowed_private_ips: Vec::new(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_allowed_domains() -> Vec<String> {
    [
        "hooks.slack.com",
        "discord.com",
        "hooks.zapier.com",
        "hook.eu1.make.com",
        "webhook.site",
    ]
    .iter()
    .map(|d| d.to_string())
    .collect()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    format!("hookgate/{}", env!("CARGO_PKG_VERSION"))
}
