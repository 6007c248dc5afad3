// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hookgate check` command implementation.
//!
//! Loads the configuration (already validated by `main`) and prints the
//! effective egress policy without serving.

use hookgate_config::HookgateConfig;

/// Runs the `hookgate check` command.
pub fn run_check(config: &HookgateConfig) {
    println!("hookgate configuration OK");
    println!();
    println!("server     {}:{}", config.server.host, config.server.port);
    println!(
        "auth       service key: {}, identity service: {}",
        if config.auth.service_key.is_some() {
            "configured"
        } else {
            "not configured"
        },
        config.auth.identity_url.as_deref().unwrap_or("not configured"),
    );
    println!(
        "throttle   {} requests per {}s window per identity",
        config.throttle.max_requests, config.throttle.window_secs
    );
    println!(
        "egress     timeout default {}ms, ceiling {}ms",
        config.egress.default_timeout_ms, config.egress.max_timeout_ms
    );
    println!("allowlist");
    for domain in &config.egress.allowed_domains {
        println!("  - {domain}");
    }
    if !config.egress.allowed_private_ips.is_empty() {
        println!("private-IP exemptions");
        for ip in &config.egress.allowed_private_ips {
            println!("  - {ip}");
        }
    }

    if config.auth.service_key.is_none() && config.auth.identity_url.is_none() {
        println!();
        println!("warning: no authentication path configured; every request will be rejected");
    }
}
