//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Invalid search criteria, detected before any request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    /// A delivery date is not in `YYYY-MM-DD` form.
    #[error("{field} must be in YYYY-MM-DD format, got {value:?}")]
    InvalidDate {
        /// Criteria key holding the date
        field: &'static str,
        /// Value as supplied
        value: String,
    },

    /// The delivery window starts after it ends.
    #[error("Start date {start} cannot be after end date {end}")]
    DateRangeInverted {
        /// `ad_delivery_date_min`
        start: String,
        /// `ad_delivery_date_max`
        end: String,
    },
}

/// Errors raised while retrieving ads.
///
/// `Auth` and `Criteria` are fatal and returned before any request. The others
/// end the retrieval loop early and travel alongside the partial results in
/// [`crate::FetchOutcome`].
#[derive(Error, Debug)]
pub enum FetchError {
    /// No API token is configured.
    #[error("API token is required")]
    Auth,

    /// The search criteria are invalid.
    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    /// The API answered with a non-200, non-429 status.
    #[error("API Error {code}: {message} (HTTP {status})")]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider error code (`error.code` in the body)
        code: String,
        /// Provider error text (`error.message` in the body)
        message: String,
    },

    /// The request never produced a response.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// A 200 response whose body is not a page of ads.
    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ReqwestError> for FetchError {
    fn from(e: ReqwestError) -> Self {
        FetchError::Transport(e.to_string())
    }
}

/// Errors raised while writing an export file.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Output file or stream failure.
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer failure.
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook writer failure.
    #[error("XLSX export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// JSON serialization failure.
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors reading or writing the token file.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The token file could not be read or written.
    #[error("Token file {path}: {source}")]
    Io {
        /// Token file path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The token file exists but is not valid `KEY=value` text.
    #[error("Token file {path} could not be parsed: {source}")]
    Parse {
        /// Token file path
        path: String,
        /// Underlying error
        #[source]
        source: dotenvy::Error,
    },
}
