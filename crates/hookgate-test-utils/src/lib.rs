// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Hookgate integration tests.
//!
//! Mock implementations of the adapter traits, for exercising the gate
//! pipeline without an identity service or real network egress.

pub mod mock_verifier;
pub mod recording_dispatcher;

pub use mock_verifier::MockVerifier;
pub use recording_dispatcher::{RecordedDelivery, RecordingDispatcher, ScriptedResult};
