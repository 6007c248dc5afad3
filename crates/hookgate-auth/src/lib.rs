// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller authentication for the Hookgate egress guard.
//!
//! Resolves inbound credentials to a [`CallerIdentity`](hookgate_core::CallerIdentity):
//! a shared service key marks trusted internal callers, bearer tokens are
//! resolved to end users through an identity service. Unauthenticated and
//! unconfigured cases fail closed.

pub mod authenticator;
pub mod verifier;

pub use authenticator::Authenticator;
pub use verifier::HttpIdentityVerifier;
