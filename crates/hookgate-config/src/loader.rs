// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./hookgate.toml` > `~/.config/hookgate/hookgate.toml`
//! > `/etc/hookgate/hookgate.toml` with environment variable overrides via
//! `HOOKGATE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HookgateConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/hookgate/hookgate.toml` (system-wide)
/// 3. `~/.config/hookgate/hookgate.toml` (user XDG config)
/// 4. `./hookgate.toml` (local directory)
/// 5. `HOOKGATE_*` environment variables
pub fn load_config() -> Result<HookgateConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HookgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HookgateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HookgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HookgateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HookgateConfig::default()))
        .merge(Toml::file("/etc/hookgate/hookgate.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("hookgate/hookgate.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("hookgate.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `HOOKGATE_AUTH_SERVICE_KEY` must map to
/// `auth.service_key`, not `auth.service.key`.
fn env_provider() -> Env {
    Env::prefixed("HOOKGATE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: HOOKGATE_AUTH_SERVICE_KEY -> "auth_service_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("throttle_", "throttle.", 1)
            .replacen("egress_", "egress.", 1);
        mapped.into()
    })
}
