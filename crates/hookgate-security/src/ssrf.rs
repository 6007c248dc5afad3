// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolved-IP SSRF enforcement for the egress HTTP client.
//!
//! The destination validator checks the literal hostname string and cannot
//! see what a DNS record actually points at. [`EgressResolver`] closes that
//! gap: it implements `reqwest::dns::Resolve` and drops any resolved address
//! in a private or reserved range before a connection is attempted, so an
//! allowlisted domain repointed at an internal address is still refused.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use tracing::{info, warn};

/// Classify an IP address as private or reserved.
///
/// Covers RFC 1918, loopback, link-local, broadcast, unspecified, the cloud
/// metadata endpoint, and the IPv6 loopback/unspecified/unique-local/
/// link-local ranges.
pub fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_broadcast()
                || v4.is_unspecified()
                || *v4 == Ipv4Addr::new(169, 254, 169, 254) // cloud metadata
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || v6.is_unspecified()
                || (v6.segments()[0] & 0xfe00) == 0xfc00 // fc00::/7 unique local
                || (v6.segments()[0] & 0xffc0) == 0xfe80 // fe80::/10 link-local
        }
    }
}

/// DNS resolver that refuses private and reserved addresses.
///
/// Addresses on the exemption list (from `egress.allowed_private_ips`) pass
/// through; everything else in a private range is dropped. A hostname whose
/// records are exhausted by the filter fails resolution entirely.
pub struct EgressResolver {
    exempt: Vec<IpAddr>,
}

impl EgressResolver {
    /// Create a resolver with the given private-IP exemptions.
    ///
    /// Entries that do not parse as IP addresses are skipped with a warning
    /// (config validation normally rejects them earlier).
    pub fn new(exempt: impl IntoIterator<Item = String>) -> Self {
        let exempt = exempt
            .into_iter()
            .filter_map(|s| match s.parse::<IpAddr>() {
                Ok(ip) => Some(ip),
                Err(_) => {
                    warn!(entry = %s, "ignoring unparseable private-IP exemption");
                    None
                }
            })
            .collect();
        Self { exempt }
    }
}

impl Resolve for EgressResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let exempt = self.exempt.clone();
        let hostname = name.as_str().to_string();

        Box::pin(async move {
            let addrs: Vec<SocketAddr> = tokio::net::lookup_host(format!("{hostname}:0"))
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> { Box::new(e) })?
                .collect();

            let usable: Vec<SocketAddr> = addrs
                .into_iter()
                .filter(|addr| {
                    let ip = addr.ip();
                    if !is_private_ip(&ip) {
                        return true;
                    }
                    if exempt.contains(&ip) {
                        info!(ip = %ip, host = %hostname, "admitting exempted private IP");
                        true
                    } else {
                        warn!(ip = %ip, host = %hostname, "egress blocked: host resolved to private IP");
                        false
                    }
                })
                .collect();

            if usable.is_empty() {
                let err: Box<dyn std::error::Error + Send + Sync> =
                    format!("egress blocked: {hostname} resolves only to private IPs").into();
                return Err(err);
            }

            let addrs: Addrs = Box::new(usable.into_iter());
            Ok(addrs)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[test]
    fn private_v4_ranges_are_classified() {
        for ip in [
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(172, 16, 0, 1),
            Ipv4Addr::new(172, 31, 255, 255),
            Ipv4Addr::new(192, 168, 1, 1),
            Ipv4Addr::new(127, 0, 0, 1),
            Ipv4Addr::new(127, 255, 255, 255),
            Ipv4Addr::new(169, 254, 1, 1),
            Ipv4Addr::new(169, 254, 169, 254),
            Ipv4Addr::new(0, 0, 0, 0),
            Ipv4Addr::new(255, 255, 255, 255),
        ] {
            assert!(is_private_ip(&IpAddr::V4(ip)), "{ip} should be private");
        }
    }

    #[test]
    fn reserved_v6_ranges_are_classified() {
        for ip in [
            Ipv6Addr::LOCALHOST,
            Ipv6Addr::UNSPECIFIED,
            Ipv6Addr::new(0xfc00, 0, 0, 0, 0, 0, 0, 1),
            Ipv6Addr::new(0xfd12, 0, 0, 0, 0, 0, 0, 1),
            Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1),
        ] {
            assert!(is_private_ip(&IpAddr::V6(ip)), "{ip} should be private");
        }
    }

    #[test]
    fn public_addresses_pass() {
        assert!(!is_private_ip(&IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))));
        assert!(!is_private_ip(&IpAddr::V4(Ipv4Addr::new(104, 18, 0, 1))));
        assert!(!is_private_ip(&IpAddr::V6(Ipv6Addr::new(
            0x2606, 0x4700, 0, 0, 0, 0, 0, 0x1111
        ))));
    }

    #[test]
    fn resolver_parses_exemptions_and_skips_garbage() {
        let resolver = EgressResolver::new(vec![
            "127.0.0.1".to_string(),
            "10.0.0.7".to_string(),
            "not-an-ip".to_string(),
        ]);
        assert_eq!(resolver.exempt.len(), 2);
    }
}
