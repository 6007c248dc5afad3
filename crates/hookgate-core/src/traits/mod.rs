// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Hookgate gate pipeline.
//!
//! Each gate with an external collaborator or swappable backend is cut at a
//! trait seam, using `#[async_trait]` for dynamic dispatch compatibility.

pub mod dispatch;
pub mod identity;
pub mod throttle;

// Re-export all traits at the traits module level for convenience.
pub use dispatch::WebhookDeliverer;
pub use identity::IdentityVerifier;
pub use throttle::ThrottleStore;
