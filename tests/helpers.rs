// Shared test helpers for mock API setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::Path;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::MockServer;

use ads_archive::{Config, RetrySettings};

pub const TEST_TOKEN: &str = "test-token-123";
pub const ARCHIVE_PATH: &str = "/v19.0/ads_archive";

/// Retry settings short enough that tests never wait noticeably.
pub fn fast_retry() -> RetrySettings {
    RetrySettings {
        page_throttle: Duration::from_millis(1),
        fallback_wait: Duration::from_millis(10),
        max_wait: Duration::from_millis(50),
        reset_window: Duration::from_millis(10),
    }
}

/// Config pointing at `server`, with an explicit token and a token file
/// under `dir` that does not exist yet.
#[allow(dead_code)] // Used by other test files
pub fn test_config(server: &MockServer, dir: &Path) -> Config {
    Config {
        token: Some(TEST_TOKEN.to_string()),
        base_url: format!("{}{}", server.uri(), ARCHIVE_PATH),
        retry: fast_retry(),
        token_file: dir.join(".env"),
        ..Default::default()
    }
}

/// A raw ad the way the API returns it.
#[allow(dead_code)] // Used by other test files
pub fn ad(id: &str, page_name: &str) -> Value {
    json!({
        "id": id,
        "page_id": format!("p{id}"),
        "page_name": page_name,
        "ad_snapshot_url": format!("https://www.facebook.com/ads/archive/render_ad/?id={id}"),
        "ad_creative_bodies": ["Vote on Tuesday", "Polls open at 7am"],
        "ad_delivery_start_time": "2024-03-01",
        "currency": "USD",
        "spend": {"lower_bound": "100", "upper_bound": "199"},
        "impressions": {"lower_bound": "1000"},
        "publisher_platforms": ["facebook", "instagram"],
        "bylines": "Committee for Testing",
        "demographic_distribution": [
            {"age": "18-24", "gender": "female", "percentage": "0.25"},
            {"age": "65+", "gender": "male", "percentage": "0.75"}
        ]
    })
}

/// A page body with optional `paging.next`.
#[allow(dead_code)] // Used by other test files
pub fn page(ads: Vec<Value>, next: Option<String>) -> Value {
    match next {
        Some(next) => json!({"data": ads, "paging": {"next": next}}),
        None => json!({"data": ads}),
    }
}
