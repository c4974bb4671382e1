//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including API endpoints, default search criteria, and timing parameters.

use std::time::Duration;

/// Graph API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v19.0";

/// Host serving the ads archive endpoint.
pub const GRAPH_API_HOST: &str = "https://graph.facebook.com";

/// Builds the ads archive endpoint for a Graph API version.
pub fn ads_archive_url(api_version: &str) -> String {
    format!("{GRAPH_API_HOST}/{api_version}/ads_archive")
}

// Default search criteria
pub const DEFAULT_AD_TYPE: &str = "POLITICAL_AND_ISSUE_ADS";
pub const DEFAULT_REACHED_COUNTRIES: &[&str] = &["US"];
pub const DEFAULT_ACTIVE_STATUS: &str = "ACTIVE";
/// Fields requested from the ads archive by default.
pub const DEFAULT_FIELDS: &str = "page_id,page_name,ad_snapshot_url,ad_creative_bodies,ad_delivery_start_time,ad_delivery_stop_time,currency,spend,impressions,demographic_distribution,publisher_platforms,bylines";

/// Query parameter carrying the bearer token.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

// Pagination and rate limiting
/// Pause between successful page requests.
pub const PAGE_THROTTLE: Duration = Duration::from_millis(500);
/// Wait applied to a 429 when no usage telemetry has been seen yet.
pub const RATE_LIMIT_FALLBACK_WAIT: Duration = Duration::from_secs(60);
/// Upper bound for any single rate-limit wait.
pub const RATE_LIMIT_MAX_WAIT: Duration = Duration::from_secs(3600);
/// Assumed time until the usage quota resets. The API does not report it.
pub const RATE_LIMIT_RESET_WINDOW: Duration = Duration::from_secs(3600);
/// Usage telemetry header reported by the Graph API.
pub const APP_USAGE_HEADER: &str = "x-app-usage";
/// `call_count` in the usage header is a percentage of the quota.
pub const USAGE_QUOTA_PERCENT: i64 = 100;

pub const HTTP_STATUS_OK: u16 = 200;
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_USER_AGENT: &str = concat!("ads_archive/", env!("CARGO_PKG_VERSION"));

// Credentials
/// Environment variable (and token file key) holding the API token.
pub const TOKEN_ENV_VAR: &str = "META_ADS_API_TOKEN";
pub const DEFAULT_TOKEN_FILE: &str = ".env";

// Results view
/// Number of rows shown in the results preview.
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;
/// Ad text longer than this is truncated in the preview table.
pub const PREVIEW_TEXT_WIDTH: usize = 100;

// Export
/// Column widths in the main sheet are capped at this many characters.
pub const MAX_MAIN_COLUMN_WIDTH: usize = 50;
/// Excel rejects cell strings longer than this.
pub const MAX_XLSX_CELL_CHARS: usize = 32_767;
pub const EXPORT_FILE_PREFIX: &str = "meta_ads_export";
