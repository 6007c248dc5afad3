// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Destination security enforcement for the Hookgate egress guard.
//!
//! Provides the pure destination validator (scheme, blocked address
//! patterns, domain allowlist), resolved-IP SSRF prevention for the egress
//! client, and secret redaction for log output.

pub mod destination;
pub mod egress;
pub mod redact;
pub mod ssrf;

pub use destination::DestinationPolicy;
pub use egress::build_egress_client;
pub use redact::{RedactingWriter, redact};
pub use ssrf::{EgressResolver, is_private_ip};
