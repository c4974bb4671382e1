//! Paginated retrieval from the ads archive.

use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::time::{sleep, Instant};

use crate::api::rate_limit::RateLimitTracker;
use crate::api::redact::redact_token;
use crate::api::response::{parse_error, parse_page, RawRecord};
use crate::api::transport::Transport;
use crate::config::{
    RetrySettings, ACCESS_TOKEN_PARAM, DEFAULT_AD_TYPE, DEFAULT_REACHED_COUNTRIES,
    HTTP_STATUS_OK, HTTP_STATUS_TOO_MANY_REQUESTS,
};
use crate::criteria::{SearchCriteria, SearchParams, AD_REACHED_COUNTRIES, AD_TYPE, LIMIT};
use crate::error_handling::FetchError;

/// Result of one retrieval.
///
/// `error` is set when the loop stopped early; `records` still holds every
/// page collected before that point.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Raw records from all retrieved pages, in page order
    pub records: Vec<RawRecord>,
    /// Pages successfully retrieved
    pub pages: usize,
    /// 429 responses waited out
    pub rate_limited: usize,
    /// Why the loop stopped early, if it did
    pub error: Option<FetchError>,
}

impl FetchOutcome {
    /// Whether pagination ran to completion or to `max_pages`.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// What a single request produced.
#[derive(Debug)]
enum PageResult {
    Page {
        records: Vec<RawRecord>,
        next: Option<String>,
    },
    RateLimited {
        wait: Duration,
    },
    Failed(FetchError),
}

/// Client for the ads archive endpoint.
///
/// Requests are issued one at a time. Rate-limit state lives as long as the
/// client.
pub struct AdsArchiveClient<T> {
    transport: T,
    base_url: String,
    retry: RetrySettings,
    rate_limit: RateLimitTracker,
}

impl<T: Transport> AdsArchiveClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>, retry: RetrySettings) -> Self {
        let rate_limit = RateLimitTracker::new(&retry);
        Self {
            transport,
            base_url: base_url.into(),
            retry,
            rate_limit,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn rate_limit(&self) -> &RateLimitTracker {
        &self.rate_limit
    }

    /// Retrieves every page matching `criteria`, up to `max_pages`.
    ///
    /// The first request goes to the base URL with the merged criteria and
    /// the token. Later requests follow the server's `paging.next` URL as-is.
    /// A 429 is waited out and the same page retried; it does not count
    /// towards `max_pages`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Auth` when no token is given and
    /// `FetchError::Criteria` when the criteria are invalid. Failures after
    /// the first request end the loop and are reported in
    /// [`FetchOutcome::error`] instead.
    pub async fn fetch(
        &mut self,
        criteria: &SearchCriteria,
        token: Option<&str>,
        max_pages: Option<usize>,
    ) -> Result<FetchOutcome, FetchError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(FetchError::Auth)?;
        criteria.validate()?;

        let first_query = SearchParams::merged(criteria).to_query(token);
        let mut outcome = FetchOutcome::default();
        let mut on_first_page = true;
        let mut next_url = Some(self.base_url.clone());

        while let Some(url) = next_url.take() {
            if max_pages.is_some_and(|max| outcome.pages >= max) {
                info!("Reached page limit ({}), stopping", outcome.pages);
                break;
            }

            let query: &[(String, String)] = if on_first_page { &first_query } else { &[] };
            match self.fetch_page(&url, query).await {
                PageResult::Page { records, next } => {
                    on_first_page = false;
                    outcome.pages += 1;
                    info!(
                        "Page {}: {} ads ({} total)",
                        outcome.pages,
                        records.len(),
                        outcome.records.len() + records.len()
                    );
                    outcome.records.extend(records);

                    let more_allowed = max_pages.map_or(true, |max| outcome.pages < max);
                    if next.is_some() && more_allowed {
                        sleep(self.retry.page_throttle).await;
                    }
                    next_url = next;
                }
                PageResult::RateLimited { wait } => {
                    outcome.rate_limited += 1;
                    warn!("Rate limited. Waiting {} seconds...", wait.as_secs());
                    sleep(wait).await;
                    next_url = Some(url);
                }
                PageResult::Failed(e) => {
                    error!("Error during API request: {e}");
                    outcome.error = Some(e);
                }
            }
        }

        info!(
            "Retrieved {} ads from {} page{}",
            outcome.records.len(),
            outcome.pages,
            if outcome.pages == 1 { "" } else { "s" }
        );
        Ok(outcome)
    }

    /// Checks a token with a minimal one-ad request.
    ///
    /// Returns `Ok(false)` for an empty token or any non-200 answer.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` when no response is received.
    pub async fn validate_token(&mut self, token: &str) -> Result<bool, FetchError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(false);
        }

        let countries: Vec<&str> = DEFAULT_REACHED_COUNTRIES.to_vec();
        let query = vec![
            (ACCESS_TOKEN_PARAM.to_string(), token.to_string()),
            (LIMIT.to_string(), "1".to_string()),
            (AD_TYPE.to_string(), DEFAULT_AD_TYPE.to_string()),
            (AD_REACHED_COUNTRIES.to_string(), serde_json::to_string(&countries)?),
        ];

        let response = self.transport.get(&self.base_url, &query).await?;
        self.rate_limit.observe(response.usage.as_deref(), Instant::now());

        if response.status == HTTP_STATUS_OK {
            return Ok(true);
        }
        warn!(
            "Token validation failed: {}",
            parse_error(response.status, &response.body)
        );
        Ok(false)
    }

    async fn fetch_page(&mut self, url: &str, query: &[(String, String)]) -> PageResult {
        debug!(
            "GET {} ({} query parameters)",
            redact_token(url),
            query.len()
        );
        let response = match self.transport.get(url, query).await {
            Ok(response) => response,
            Err(e) => return PageResult::Failed(e),
        };

        self.rate_limit.observe(response.usage.as_deref(), Instant::now());

        match response.status {
            HTTP_STATUS_TOO_MANY_REQUESTS => PageResult::RateLimited {
                wait: self.rate_limit.wait_time(Instant::now()),
            },
            HTTP_STATUS_OK => match parse_page(&response.body) {
                Ok(page) => PageResult::Page {
                    records: page.records,
                    next: page.next,
                },
                Err(e) => PageResult::Failed(e),
            },
            status => PageResult::Failed(parse_error(status, &response.body)),
        }
    }
}
