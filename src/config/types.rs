//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    ads_archive_url, DEFAULT_API_VERSION, DEFAULT_PREVIEW_LIMIT, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TOKEN_FILE, DEFAULT_USER_AGENT, PAGE_THROTTLE, RATE_LIMIT_FALLBACK_WAIT,
    RATE_LIMIT_MAX_WAIT, RATE_LIMIT_RESET_WINDOW,
};
use crate::export::ExportFormat;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Timing knobs for the retrieval loop.
///
/// The reset window is a guess: the usage header reports consumption but not
/// when the quota resets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySettings {
    /// Pause after each successful page before requesting the next one
    pub page_throttle: Duration,
    /// Wait on a 429 when no usage telemetry has been observed
    pub fallback_wait: Duration,
    /// Cap on any single rate-limit wait
    pub max_wait: Duration,
    /// Assumed time from the last telemetry observation until quota reset
    pub reset_window: Duration,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            page_throttle: PAGE_THROTTLE,
            fallback_wait: RATE_LIMIT_FALLBACK_WAIT,
            max_wait: RATE_LIMIT_MAX_WAIT,
            reset_window: RATE_LIMIT_RESET_WINDOW,
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use ads_archive::Config;
///
/// let config = Config {
///     token: Some("EAAB...".to_string()),
///     max_pages: Some(5),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the ads archive
    pub token: Option<String>,

    /// Full ads archive endpoint
    pub base_url: String,

    /// Maximum number of pages to retrieve (`None` for all)
    pub max_pages: Option<usize>,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Pagination and rate-limit timing
    pub retry: RetrySettings,

    /// Where the API token is persisted
    pub token_file: PathBuf,

    /// Export destination (`None` skips export)
    pub output: Option<PathBuf>,

    /// Export format
    pub export_format: ExportFormat,

    /// Rows printed in the results preview
    pub preview_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            base_url: ads_archive_url(DEFAULT_API_VERSION),
            max_pages: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetrySettings::default(),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            output: None,
            export_format: ExportFormat::Xlsx,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}
