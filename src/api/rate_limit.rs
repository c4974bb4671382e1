//! Rate-limit bookkeeping from usage telemetry.
//!
//! The Graph API reports quota consumption in the `x-app-usage` header as a
//! JSON object whose `call_count` is a percentage of the quota. It does not
//! say when the quota resets, so the reset time is assumed to be
//! `reset_window` after the latest observation.

use std::time::Duration;

use log::debug;
use serde_json::Value;
use tokio::time::Instant;

use crate::config::{RetrySettings, USAGE_QUOTA_PERCENT};

/// Tracks the latest quota estimate for one retriever instance.
#[derive(Debug, Clone)]
pub struct RateLimitTracker {
    remaining: Option<i64>,
    reset_at: Option<Instant>,
    fallback_wait: Duration,
    max_wait: Duration,
    reset_window: Duration,
}

impl RateLimitTracker {
    pub fn new(settings: &RetrySettings) -> Self {
        Self {
            remaining: None,
            reset_at: None,
            fallback_wait: settings.fallback_wait,
            max_wait: settings.max_wait,
            reset_window: settings.reset_window,
        }
    }

    /// Estimated calls left, as a percentage of the quota.
    pub fn remaining(&self) -> Option<i64> {
        self.remaining
    }

    /// Updates the estimate from a usage header. Absent or unparsable
    /// headers leave the previous estimate in place.
    pub fn observe(&mut self, usage_header: Option<&str>, now: Instant) {
        let Some(raw) = usage_header else {
            return;
        };
        let Ok(Value::Object(usage)) = serde_json::from_str::<Value>(raw) else {
            debug!("Ignoring unparsable usage header: {raw}");
            return;
        };

        let call_count = usage
            .get("call_count")
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .unwrap_or(0);
        self.remaining = Some(USAGE_QUOTA_PERCENT - call_count);
        self.reset_at = Some(now + self.reset_window);
        debug!(
            "Usage telemetry: call_count={call_count}, remaining={}",
            USAGE_QUOTA_PERCENT - call_count
        );
    }

    /// How long to wait after a 429.
    ///
    /// Time until the estimated reset, capped at `max_wait`, or the fallback
    /// wait when no telemetry has been seen.
    pub fn wait_time(&self, now: Instant) -> Duration {
        match self.reset_at {
            Some(reset_at) => reset_at.saturating_duration_since(now).min(self.max_wait),
            None => self.fallback_wait,
        }
    }
}
