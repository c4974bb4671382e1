//! ads_archive library: retrieval and export of Meta Ads Library data
//!
//! This library queries the Graph API `ads_archive` endpoint, follows its
//! pagination while respecting rate limits, flattens the variable-shape ad
//! records into uniform rows, and exports them as a workbook, CSV or JSONL.
//!
//! # Example
//!
//! ```no_run
//! use ads_archive::{run_search, Config, SearchCriteria};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     token: Some("EAAB...".to_string()),
//!     max_pages: Some(3),
//!     ..Default::default()
//! };
//! let criteria = SearchCriteria {
//!     search_terms: Some("climate".to_string()),
//!     ..Default::default()
//! };
//!
//! let report = run_search(&config, &criteria).await?;
//! println!("Retrieved {} ads from {} pages", report.records.len(), report.pages);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod api;
pub mod app;
pub mod config;
pub mod credentials;
pub mod criteria;
mod error_handling;
pub mod export;
pub mod initialization;
pub mod normalize;

// Re-export public API
pub use api::{AdsArchiveClient, FetchOutcome, HttpTransport, RawRecord, Transport};
pub use config::{Config, LogFormat, LogLevel, RetrySettings};
pub use credentials::{resolve_token, TokenStore};
pub use criteria::{ActiveStatus, AdType, Platform, SearchCriteria, SearchParams};
pub use error_handling::{
    CredentialError, CriteriaError, ExportError, FetchError, InitializationError,
};
pub use export::{ExportFormat, ExportOptions, ExportSummary};
pub use normalize::{FlatRecord, Normalizer, ResultSet};
pub use run::{check_token, run_search, SearchReport};

// Internal run module (wires retrieval, normalization and export together)
mod run {
    use anyhow::{Context, Result};
    use log::{debug, info};
    use tokio::time::Instant;

    use crate::api::{AdsArchiveClient, HttpTransport};
    use crate::config::Config;
    use crate::credentials::{resolve_token, TokenStore};
    use crate::criteria::{SearchCriteria, SearchParams};
    use crate::error_handling::FetchError;
    use crate::export::{export, ExportOptions, ExportSummary};
    use crate::initialization::init_client;
    use crate::normalize::{Normalizer, ResultSet};

    /// Results of one search.
    ///
    /// When `error` is set the search stopped early and `records` holds the
    /// ads retrieved before the failure.
    #[derive(Debug)]
    pub struct SearchReport {
        /// Flattened ads, in retrieval order
        pub records: ResultSet,
        /// Criteria sent to the API (defaults merged with overrides)
        pub params: SearchParams,
        /// Pages retrieved
        pub pages: usize,
        /// Rate limit responses waited out
        pub rate_limited: usize,
        /// Why retrieval stopped early, if it did
        pub error: Option<FetchError>,
        /// What was exported, when an output was configured
        pub export: Option<ExportSummary>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl SearchReport {
        /// Whether retrieval ran to completion (or to the page limit).
        pub fn is_complete(&self) -> bool {
            self.error.is_none()
        }
    }

    fn client_for(config: &Config) -> Result<AdsArchiveClient<HttpTransport>> {
        let http = init_client(config).context("Failed to initialize HTTP client")?;
        Ok(AdsArchiveClient::new(
            HttpTransport::new(http),
            config.base_url.clone(),
            config.retry.clone(),
        ))
    }

    fn token_for(config: &Config) -> Result<Option<String>> {
        let store = TokenStore::new(&config.token_file);
        resolve_token(config.token.as_deref(), &store).with_context(|| {
            format!("Failed to read API token from {}", store.path().display())
        })
    }

    /// Runs a search with the provided configuration.
    ///
    /// Retrieves every page (up to `config.max_pages`), flattens the ads and,
    /// when `config.output` is set, exports them in `config.export_format`.
    /// A failure after the first page does not fail the search: the partial
    /// results are returned with [`SearchReport::error`] set and still
    /// exported.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - No API token can be found
    /// - The criteria are invalid (e.g. start date after end date)
    /// - The token file or HTTP client cannot be initialized
    /// - The export file cannot be written
    pub async fn run_search(config: &Config, criteria: &SearchCriteria) -> Result<SearchReport> {
        let start = Instant::now();
        let token = token_for(config)?;
        let mut client = client_for(config)?;

        let outcome = client
            .fetch(criteria, token.as_deref(), config.max_pages)
            .await
            .context("Search failed")?;

        let mut normalizer = Normalizer::new();
        let records = normalizer.normalize(&outcome.records);
        let params = SearchParams::merged(criteria);
        debug!("Normalized {} ads", records.len());

        let exported = match &config.output {
            Some(path) => {
                let options = ExportOptions {
                    output: Some(path.clone()),
                    format: config.export_format,
                };
                let summary = export(&records, &params, &options)
                    .with_context(|| format!("Failed to export to {}", path.display()))?;
                Some(summary)
            }
            None => None,
        };

        let report = SearchReport {
            records,
            params,
            pages: outcome.pages,
            rate_limited: outcome.rate_limited,
            error: outcome.error,
            export: exported,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        };
        info!(
            "Search finished: {} ads, complete={}",
            report.records.len(),
            report.is_complete()
        );
        Ok(report)
    }

    /// Checks the configured token against the API with a one-ad request.
    ///
    /// Returns `Ok(false)` when no token is configured or the API rejects it.
    ///
    /// # Errors
    ///
    /// Returns an error if the token file cannot be read or the API cannot be
    /// reached.
    pub async fn check_token(config: &Config) -> Result<bool> {
        let Some(token) = token_for(config)? else {
            return Ok(false);
        };
        let mut client = client_for(config)?;
        client
            .validate_token(&token)
            .await
            .context("Token validation request failed")
    }
}
