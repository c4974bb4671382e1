//! HTTP transport used by the retriever.
//!
//! The retriever only needs one operation: GET a URL, optionally with query
//! pairs, and hand back the status, the usage header and the body. Keeping it
//! behind a trait lets tests script responses without a server.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::APP_USAGE_HEADER;
use crate::error_handling::FetchError;

/// A response as seen by the retrieval loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw `x-app-usage` header value, if present
    pub usage: Option<String>,
    /// Response body
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            usage: None,
            body: body.into(),
        }
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }
}

/// Issues GET requests for the retriever.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a GET to `url`. `query` is appended when non-empty.
    ///
    /// Only failures to obtain a response are errors; HTTP error statuses are
    /// returned as ordinary responses.
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<ApiResponse, FetchError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpTransport {
    client: Arc<reqwest::Client>,
}

impl HttpTransport {
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<ApiResponse, FetchError> {
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;

        let status = response.status().as_u16();
        let usage = response
            .headers()
            .get(APP_USAGE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        Ok(ApiResponse {
            status,
            usage,
            body,
        })
    }
}
