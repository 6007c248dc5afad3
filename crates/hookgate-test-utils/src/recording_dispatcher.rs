// SPDX-FileCopyrightText: 2026 Hookgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording dispatcher for gate-order and outcome-mapping tests.
//!
//! `RecordingDispatcher` implements `WebhookDeliverer` without any network:
//! it records every delivery it is asked to make and answers from a scripted
//! result queue, so tests can assert both *whether* the dispatch gate was
//! reached and *how* its result is surfaced.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use hookgate_core::{DeliveryOutcome, HookgateError, WebhookDeliverer};
use url::Url;

/// One delivery the dispatcher was asked to perform.
#[derive(Debug, Clone)]
pub struct RecordedDelivery {
    /// The validated destination, as a string.
    pub destination: String,
    /// The payload that would have been POSTed.
    pub payload: serde_json::Value,
    /// The (pre-clamp) timeout the gateway requested.
    pub timeout: Duration,
}

/// A scripted answer for one delivery.
#[derive(Debug, Clone, Copy)]
pub enum ScriptedResult {
    /// The destination answered with this outcome.
    Outcome(DeliveryOutcome),
    /// The delivery timed out.
    Timeout,
    /// The destination was unreachable.
    TransportFailure,
}

/// A `WebhookDeliverer` that records calls and replays scripted results.
///
/// Results are popped FIFO; when the queue is empty, a 200 outcome is
/// returned.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    deliveries: Mutex<Vec<RecordedDelivery>>,
    script: Mutex<VecDeque<ScriptedResult>>,
}

impl RecordingDispatcher {
    /// Create a dispatcher that answers every delivery with a 200.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher pre-loaded with scripted results.
    pub fn with_results(results: Vec<ScriptedResult>) -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::from(results)),
        }
    }

    /// Append a scripted result to the queue.
    pub fn push_result(&self, result: ScriptedResult) {
        self.script.lock().unwrap().push_back(result);
    }

    /// All deliveries recorded so far.
    pub fn deliveries(&self) -> Vec<RecordedDelivery> {
        self.deliveries.lock().unwrap().clone()
    }

    /// Number of deliveries recorded so far.
    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

#[async_trait]
impl WebhookDeliverer for RecordingDispatcher {
    async fn deliver(
        &self,
        destination: &Url,
        payload: &serde_json::Value,
        timeout: Duration,
    ) -> Result<DeliveryOutcome, HookgateError> {
        self.deliveries.lock().unwrap().push(RecordedDelivery {
            destination: destination.to_string(),
            payload: payload.clone(),
            timeout,
        });

        let scripted = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ScriptedResult::Outcome(DeliveryOutcome::from_status(200)));

        match scripted {
            ScriptedResult::Outcome(outcome) => Ok(outcome),
            ScriptedResult::Timeout => Err(HookgateError::Timeout { duration: timeout }),
            ScriptedResult::TransportFailure => Err(HookgateError::DeliveryFailed {
                message: "could not reach destination".to_string(),
                source: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_deliveries_and_defaults_to_200() {
        let dispatcher = RecordingDispatcher::new();
        let url = Url::parse("https://hooks.slack.com/services/x").unwrap();

        let outcome = dispatcher
            .deliver(&url, &serde_json::json!({"k": 1}), Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(outcome.status, 200);
        assert_eq!(dispatcher.delivery_count(), 1);
        let recorded = &dispatcher.deliveries()[0];
        assert_eq!(recorded.destination, "https://hooks.slack.com/services/x");
        assert_eq!(recorded.payload, serde_json::json!({"k": 1}));
    }

    #[tokio::test]
    async fn replays_scripted_results_in_order() {
        let dispatcher = RecordingDispatcher::with_results(vec![
            ScriptedResult::Outcome(DeliveryOutcome::from_status(500)),
            ScriptedResult::Timeout,
        ]);
        let url = Url::parse("https://hooks.slack.com/services/x").unwrap();

        let first = dispatcher
            .deliver(&url, &serde_json::json!({}), Duration::from_secs(10))
            .await
            .unwrap();
        assert_eq!(first.status, 500);

        let second = dispatcher
            .deliver(&url, &serde_json::json!({}), Duration::from_secs(10))
            .await
            .unwrap_err();
        assert!(matches!(second, HookgateError::Timeout { .. }));
    }
}
