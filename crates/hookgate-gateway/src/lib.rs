// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Hookgate egress guard.
//!
//! One dispatch route behind a fixed gate sequence -- authenticate,
//! throttle, validate, dispatch -- short-circuiting on the first failure.
//! Rejections are JSON with stable status codes; a completed delivery
//! attempt is always an outer 200 with the outcome in the body.

pub mod auth;
pub mod handlers;
pub mod reject;
pub mod server;
pub mod throttle;

pub use reject::Rejection;
pub use server::{GatewayState, HealthState, build_router, start_server};
