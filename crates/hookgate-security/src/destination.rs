// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Destination URL validation for outbound webhook delivery.
//!
//! Pure and synchronous: no DNS resolution happens here. The checks run on
//! the literal hostname string, in a fixed order, short-circuiting on the
//! first failure:
//!
//! 1. the URL must parse as an absolute URL,
//! 2. the scheme must be exactly `https`,
//! 3. the hostname must not match a blocked address pattern (loopback,
//!    RFC 1918, link-local, cloud metadata),
//! 4. the hostname must be on, or a subdomain of, the configured allowlist.
//!
//! The allowlist is the primary SSRF control; the blocked-pattern list is
//! defense-in-depth and runs first so an allowlist entry can never admit a
//! reserved address. Resolved-IP enforcement happens separately in the
//! egress client (see [`crate::ssrf`]).

use std::net::IpAddr;

use hookgate_core::HookgateError;
use tracing::warn;
use url::Url;

use crate::ssrf::is_private_ip;

/// Hostnames rejected outright, independent of any IP parsing.
const BLOCKED_HOSTNAMES: &[&str] = &[
    "localhost",
    "metadata.google.internal",
    "metadata.aws.internal",
];

/// The configured destination policy for outbound deliveries.
#[derive(Debug, Clone)]
pub struct DestinationPolicy {
    allowed_domains: Vec<String>,
}

impl DestinationPolicy {
    /// Create a policy from allowlist entries (bare hostnames, lowercased).
    pub fn new(allowed_domains: Vec<String>) -> Self {
        Self {
            allowed_domains: allowed_domains
                .into_iter()
                .map(|d| d.trim().to_ascii_lowercase())
                .collect(),
        }
    }

    /// The configured allowlist entries.
    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    /// Validate a candidate destination URL.
    ///
    /// Returns the parsed URL on success so the dispatcher reuses it instead
    /// of re-parsing the string (no gap between what was validated and what
    /// is dispatched).
    pub fn validate(&self, raw: &str) -> Result<Url, HookgateError> {
        let parsed = Url::parse(raw).map_err(|_| {
            HookgateError::InvalidDestination("Invalid URL format".to_string())
        })?;

        if parsed.scheme() != "https" {
            return Err(HookgateError::InvalidDestination(
                "Only HTTPS URLs are allowed".to_string(),
            ));
        }

        let Some(host) = parsed.host_str() else {
            return Err(HookgateError::InvalidDestination(
                "Invalid URL format".to_string(),
            ));
        };
        let host = host.to_ascii_lowercase();

        if is_blocked_host(&host) {
            warn!(host = %host, "destination rejected: blocked address space");
            return Err(HookgateError::InvalidDestination(
                "URL targets a blocked address space".to_string(),
            ));
        }

        if !self.matches_allowlist(&host) {
            return Err(HookgateError::InvalidDestination(format!(
                "Destination host `{host}` is not an allowed webhook domain (allowed: {})",
                self.allowed_domains.join(", ")
            )));
        }

        Ok(parsed)
    }

    /// Whether `host` equals an allowlist entry or sits below one.
    ///
    /// Matching extends below listed entries only: `sub.hooks.slack.com`
    /// matches the entry `hooks.slack.com`, but `slack.com` does not.
    fn matches_allowlist(&self, host: &str) -> bool {
        self.allowed_domains.iter().any(|domain| {
            host == domain || host.ends_with(&format!(".{domain}"))
        })
    }
}

/// Test a literal hostname against the blocked address patterns.
///
/// IP literals (v4 and bracketed v6) are classified via [`is_private_ip`];
/// named hosts are matched against the fixed blocked-hostname list. IPv6
/// text that does not parse standalone still betrays its scope by prefix.
fn is_blocked_host(host: &str) -> bool {
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    if BLOCKED_HOSTNAMES.contains(&bare) {
        return true;
    }

    if let Ok(ip) = bare.parse::<IpAddr>() {
        return is_private_ip(&ip);
    }

    bare.starts_with("fe80:") || bare.starts_with("fc00:") || bare.starts_with("fd00:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn policy() -> DestinationPolicy {
        DestinationPolicy::new(vec![
            "hooks.slack.com".to_string(),
            "discord.com".to_string(),
            "webhook.site".to_string(),
        ])
    }

    fn reason(err: HookgateError) -> String {
        match err {
            HookgateError::InvalidDestination(reason) => reason,
            other => panic!("expected InvalidDestination, got {other:?}"),
        }
    }

    // --- URL format ---

    #[test]
    fn malformed_input_is_invalid_format() {
        for raw in ["", "not a url", "hooks.slack.com/services/x", "https://"] {
            assert_eq!(reason(policy().validate(raw).unwrap_err()), "Invalid URL format");
        }
    }

    // --- Scheme ---

    #[test]
    fn non_https_schemes_are_rejected() {
        for raw in [
            "http://hooks.slack.com/services/x",
            "ftp://hooks.slack.com/x",
            "ws://hooks.slack.com/x",
            "file:///etc/passwd",
        ] {
            assert_eq!(
                reason(policy().validate(raw).unwrap_err()),
                "Only HTTPS URLs are allowed"
            );
        }
    }

    // --- Blocked address space ---

    #[test]
    fn loopback_and_rfc1918_hosts_are_blocked() {
        for raw in [
            "https://localhost/hook",
            "https://127.0.0.1/hook",
            "https://127.255.0.1/hook",
            "https://10.0.0.1/hook",
            "https://10.255.255.255/hook",
            "https://172.16.0.1/hook",
            "https://172.31.255.255/hook",
            "https://192.168.1.1/hook",
            "https://169.254.0.1/hook",
            "https://0.0.0.0/hook",
        ] {
            assert_eq!(
                reason(policy().validate(raw).unwrap_err()),
                "URL targets a blocked address space",
                "expected {raw} to be blocked"
            );
        }
    }

    #[test]
    fn ipv6_reserved_hosts_are_blocked() {
        for raw in [
            "https://[::1]/hook",
            "https://[fe80::1]/hook",
            "https://[fc00::1]/hook",
            "https://[fd00::1]/hook",
        ] {
            assert_eq!(
                reason(policy().validate(raw).unwrap_err()),
                "URL targets a blocked address space",
                "expected {raw} to be blocked"
            );
        }
    }

    #[test]
    fn cloud_metadata_hosts_are_blocked() {
        for raw in [
            "https://169.254.169.254/latest/meta-data",
            "https://metadata.google.internal/computeMetadata/v1",
            "https://metadata.aws.internal/latest",
        ] {
            assert_eq!(
                reason(policy().validate(raw).unwrap_err()),
                "URL targets a blocked address space"
            );
        }
    }

    #[test]
    fn blocklist_runs_before_allowlist() {
        // Even an allowlist entry cannot admit a reserved address.
        let permissive = DestinationPolicy::new(vec![
            "localhost".to_string(),
            "169.254.169.254".to_string(),
        ]);
        assert_eq!(
            reason(permissive.validate("https://localhost/hook").unwrap_err()),
            "URL targets a blocked address space"
        );
        assert_eq!(
            reason(
                permissive
                    .validate("https://169.254.169.254/latest")
                    .unwrap_err()
            ),
            "URL targets a blocked address space"
        );
    }

    // --- Allowlist ---

    #[test]
    fn unlisted_host_is_rejected_by_name() {
        let err = reason(policy().validate("https://evil.example.com/hook").unwrap_err());
        assert!(err.contains("evil.example.com"));
        // The rejection echoes the configured allowlist.
        assert!(err.contains("hooks.slack.com"));
        assert!(err.contains("webhook.site"));
    }

    #[test]
    fn exact_allowlist_match_is_valid() {
        let url = policy()
            .validate("https://hooks.slack.com/services/T000/B000/XXX")
            .unwrap();
        assert_eq!(url.host_str(), Some("hooks.slack.com"));
        assert_eq!(url.path(), "/services/T000/B000/XXX");
    }

    #[test]
    fn subdomain_of_allowlisted_entry_is_valid() {
        assert!(policy().validate("https://sub.hooks.slack.com/x").is_ok());
        assert!(policy().validate("https://canary.discord.com/api/webhooks/1/t").is_ok());
    }

    #[test]
    fn matching_does_not_extend_above_entries() {
        // `hooks.slack.com` is listed; its parent is not thereby allowed.
        let err = reason(policy().validate("https://slack.com/x").unwrap_err());
        assert!(err.contains("slack.com"));
        // Nor does a lookalike suffix without the dot boundary match.
        assert!(policy().validate("https://nothooks.slack.com/x").is_err());
    }

    #[test]
    fn host_case_is_normalized() {
        assert!(policy().validate("https://HOOKS.SLACK.COM/services/x").is_ok());
    }

    proptest! {
        #[test]
        fn any_non_https_scheme_is_rejected(scheme in "[a-z][a-z0-9+]{0,8}") {
            prop_assume!(scheme != "https");
            let raw = format!("{scheme}://hooks.slack.com/services/x");
            let err = policy().validate(&raw).unwrap_err().to_string();
            prop_assert!(
                err.contains("Only HTTPS URLs are allowed") || err.contains("Invalid URL format")
            );
        }
    }
}
