//! Token redaction for logged URLs.

use url::Url;

use crate::config::ACCESS_TOKEN_PARAM;

const REDACTED: &str = "***";

/// Returns `raw` with the `access_token` query value masked.
///
/// Next-page URLs returned by the API embed the token, so they must pass
/// through here before being logged. Unparsable input is returned unchanged.
pub fn redact_token(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_string();
    };
    if !url.query_pairs().any(|(k, _)| k == ACCESS_TOKEN_PARAM) {
        return raw.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == ACCESS_TOKEN_PARAM {
                REDACTED.to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_access_token() {
        let redacted = redact_token(
            "https://graph.facebook.com/v19.0/ads_archive?access_token=EAAB123&limit=25&after=QVFI",
        );
        assert!(!redacted.contains("EAAB123"));
        assert!(redacted.contains("access_token=***"));
        assert!(redacted.contains("limit=25"));
        assert!(redacted.contains("after=QVFI"));
    }

    #[test]
    fn test_url_without_token_unchanged() {
        let url = "https://graph.facebook.com/v19.0/ads_archive?limit=25";
        assert_eq!(redact_token(url), url);
    }

    #[test]
    fn test_unparsable_input_unchanged() {
        assert_eq!(redact_token("not a url"), "not a url");
    }
}
