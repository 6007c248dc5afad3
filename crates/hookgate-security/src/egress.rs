// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hardened reqwest client construction for outbound deliveries.
//!
//! - Minimum TLS 1.2 for all connections.
//! - Resolved IPs filtered through [`EgressResolver`](crate::ssrf::EgressResolver).
//! - Redirect following disabled: a 3xx from an allowlisted destination must
//!   not become a second, unvalidated request.

use std::sync::Arc;

use hookgate_core::HookgateError;
use tracing::error;

use crate::ssrf::EgressResolver;

/// Build the egress `reqwest::Client` used by the dispatcher.
///
/// `allowed_private_ips` lists addresses exempt from the resolved-IP filter
/// (typically empty outside dev/test deployments).
pub fn build_egress_client(
    allowed_private_ips: Vec<String>,
) -> Result<reqwest::Client, HookgateError> {
    let resolver = EgressResolver::new(allowed_private_ips);

    reqwest::Client::builder()
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .redirect(reqwest::redirect::Policy::none())
        .dns_resolver(Arc::new(resolver))
        .build()
        .map_err(|e| {
            error!("failed to build egress HTTP client: {e}");
            HookgateError::Config(format!("failed to build egress HTTP client: {e}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_egress_client_succeeds() {
        assert!(build_egress_client(vec![]).is_ok());
    }

    #[test]
    fn build_egress_client_accepts_exemptions() {
        assert!(build_egress_client(vec!["127.0.0.1".to_string()]).is_ok());
    }
}
