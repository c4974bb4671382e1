//! Response body decoding.

use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error_handling::FetchError;

/// One ad as returned by the API. Shape varies with the requested fields.
pub type RawRecord = Map<String, Value>;

/// A decoded page of ads.
#[derive(Debug, Default)]
pub(crate) struct Page {
    pub records: Vec<RawRecord>,
    pub next: Option<String>,
}

#[derive(Deserialize)]
struct PageBody {
    #[serde(default)]
    data: Vec<Value>,
    #[serde(default)]
    paging: Option<Paging>,
}

#[derive(Deserialize)]
struct Paging {
    #[serde(default)]
    next: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Decodes a 200 body into its records and the next-page URL.
pub(crate) fn parse_page(body: &str) -> Result<Page, FetchError> {
    let body: PageBody = serde_json::from_str(body)?;

    let total = body.data.len();
    let records: Vec<RawRecord> = body
        .data
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();
    if records.len() < total {
        warn!(
            "Skipped {} non-object entries in page data",
            total - records.len()
        );
    }

    let next = body
        .paging
        .and_then(|p| p.next)
        .filter(|next| !next.is_empty());

    Ok(Page { records, next })
}

/// Builds an [`FetchError::Api`] from an error response.
///
/// Bodies without an `error` object still produce an error, with the
/// provider code and message defaulted.
pub(crate) fn parse_error(status: u16, body: &str) -> FetchError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error);

    let (code, message) = match detail {
        Some(detail) => (
            detail.code.map(|c| match c {
                Value::String(s) => s,
                other => other.to_string(),
            }),
            detail.message,
        ),
        None => (None, None),
    };

    FetchError::Api {
        status,
        code: code.unwrap_or_else(|| "Unknown code".to_string()),
        message: message.unwrap_or_else(|| "Unknown error".to_string()),
    }
}
