//! Ads archive retrieval.
//!
//! This module provides:
//! - The [`Transport`] seam and its `reqwest` implementation
//! - Rate-limit bookkeeping from usage telemetry
//! - The paginated retrieval loop ([`AdsArchiveClient::fetch`])

mod client;
mod rate_limit;
mod redact;
mod response;
mod transport;

pub use client::{AdsArchiveClient, FetchOutcome};
pub use rate_limit::RateLimitTracker;
pub use redact::redact_token;
pub use response::RawRecord;
pub use transport::{ApiResponse, HttpTransport, Transport};
