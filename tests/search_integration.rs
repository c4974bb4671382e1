//! Integration tests for `run_search` and `check_token` against a mock Graph API.
//!
//! These tests do not make real network requests; every response comes from
//! a local `wiremock` server.

use ads_archive::{check_token, run_search, FetchError, SearchCriteria};
use chrono::NaiveDate;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "helpers.rs"]
mod helpers;

use helpers::{ad, page, test_config, ARCHIVE_PATH, TEST_TOKEN};

fn criteria(terms: &str) -> SearchCriteria {
    SearchCriteria {
        search_terms: Some(terms.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_search_follows_pagination_in_order() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp directory");
    let next = format!("{}/page2?after=abc&access_token={TEST_TOKEN}", server.uri());

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![ad("1", "A"), ad("2", "B")], Some(next))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page2"))
        .and(query_param("after", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![ad("3", "C")], None)))
        .expect(1)
        .mount(&server)
        .await;

    let report = run_search(&test_config(&server, dir.path()), &criteria("climate"))
        .await
        .expect("Search should succeed");

    assert!(report.is_complete());
    assert_eq!(report.pages, 2);
    let ids: Vec<&str> = report.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);

    let first = &report.records[0];
    assert_eq!(first.spend, "100-199");
    assert_eq!(first.impressions, ">1000");
    assert_eq!(first.platforms, "facebook, instagram");
    assert_eq!(first.ad_creative_body, "Vote on Tuesday\nPolls open at 7am");
    assert_eq!(
        first.demographics.get("demo_65plus_male").map(String::as_str),
        Some("0.75")
    );
}

#[tokio::test]
async fn test_first_request_carries_merged_criteria_and_token() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp directory");

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![ad("1", "A")], None)))
        .mount(&server)
        .await;

    let criteria = SearchCriteria {
        search_terms: Some("housing".to_string()),
        ad_reached_countries: Some(vec!["US".to_string(), "CA".to_string()]),
        ad_delivery_date_min: NaiveDate::from_ymd_opt(2024, 1, 1),
        ..Default::default()
    };
    run_search(&test_config(&server, dir.path()), &criteria)
        .await
        .expect("Search should succeed");

    let requests = server.received_requests().await.expect("Recording is enabled");
    assert_eq!(requests.len(), 1);
    let query: Vec<(String, String)> = requests[0].url.query_pairs().into_owned().collect();
    let get = |key: &str| {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    assert_eq!(get("access_token"), Some(TEST_TOKEN));
    assert_eq!(get("search_terms"), Some("housing"));
    assert_eq!(get("ad_reached_countries"), Some(r#"["US","CA"]"#));
    assert_eq!(get("ad_delivery_date_min"), Some("2024-01-01"));
    // Defaults fill in what the criteria leave unset
    assert_eq!(get("ad_type"), Some("POLITICAL_AND_ISSUE_ADS"));
    assert_eq!(get("ad_active_status"), Some("ACTIVE"));
    assert!(get("fields").is_some_and(|f| f.contains("demographic_distribution")));
}

#[tokio::test]
async fn test_max_pages_stops_before_following_next() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp directory");
    let next = format!("{}/page2", server.uri());

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(vec![ad("1", "A")], Some(next))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![ad("2", "B")], None)))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config(&server, dir.path());
    config.max_pages = Some(1);
    let report = run_search(&config, &criteria("x")).await.expect("Search should succeed");

    assert_eq!(report.pages, 1);
    assert_eq!(report.records.len(), 1);
    assert!(report.is_complete());
}

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp directory");

    // Mounted first, so it answers the first request only
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-app-usage", r#"{"call_count":100,"total_time":20}"#)
                .set_body_json(json!({
                    "error": {"code": 4, "message": "Application request limit reached"}
                })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![ad("1", "A")], None)))
        .mount(&server)
        .await;

    let report = run_search(&test_config(&server, dir.path()), &criteria("x"))
        .await
        .expect("Search should succeed");

    assert!(report.is_complete());
    assert_eq!(report.rate_limited, 1);
    assert_eq!(report.pages, 1);
    assert_eq!(report.records.len(), 1);

    // The retry repeats the full first-page query
    let requests = server.received_requests().await.expect("Recording is enabled");
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url, requests[1].url);
}

#[tokio::test]
async fn test_api_error_keeps_earlier_pages() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp directory");
    let next = format!("{}/page2", server.uri());

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![ad("1", "A"), ad("2", "B")], Some(next))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 100, "message": "Invalid parameter"}
        })))
        .mount(&server)
        .await;

    let report = run_search(&test_config(&server, dir.path()), &criteria("x"))
        .await
        .expect("Partial results are not a search failure");

    assert!(!report.is_complete());
    assert_eq!(report.pages, 1);
    assert_eq!(report.records.len(), 2);
    match &report.error {
        Some(FetchError::Api {
            status,
            code,
            message,
        }) => {
            assert_eq!(*status, 400);
            assert_eq!(code, "100");
            assert_eq!(message, "Invalid parameter");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_stops_search() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp directory");

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let report = run_search(&test_config(&server, dir.path()), &criteria("x"))
        .await
        .expect("Decode failures are reported in the report");

    assert!(report.records.is_empty());
    assert!(matches!(report.error, Some(FetchError::Decode(_))));
}

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp directory");

    let mut config = test_config(&server, dir.path());
    config.token = Some("   ".to_string());
    let err = run_search(&config, &criteria("x"))
        .await
        .expect_err("Search without a token must fail");

    assert!(matches!(
        err.downcast_ref::<FetchError>(),
        Some(FetchError::Auth)
    ));
    let requests = server.received_requests().await.expect("Recording is enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_token_is_read_from_token_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp directory");

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .and(query_param("access_token", "from-file-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![], None)))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(&server, dir.path());
    config.token = None;
    ads_archive::TokenStore::new(&config.token_file)
        .save("from-file-token")
        .expect("Failed to save token");

    let report = run_search(&config, &criteria("x")).await.expect("Search should succeed");
    assert!(report.records.is_empty());
    assert_eq!(report.pages, 1);
}

#[tokio::test]
async fn test_inverted_dates_fail_before_any_request() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp directory");

    let criteria = SearchCriteria {
        ad_delivery_date_min: NaiveDate::from_ymd_opt(2024, 6, 1),
        ad_delivery_date_max: NaiveDate::from_ymd_opt(2024, 1, 1),
        ..Default::default()
    };
    let err = run_search(&test_config(&server, dir.path()), &criteria)
        .await
        .expect_err("Inverted dates must be rejected");

    assert!(matches!(
        err.downcast_ref::<FetchError>(),
        Some(FetchError::Criteria(_))
    ));
    assert!(server
        .received_requests()
        .await
        .expect("Recording is enabled")
        .is_empty());
}

#[tokio::test]
async fn test_check_token_accepts_and_rejects() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp directory");

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .and(query_param("access_token", TEST_TOKEN))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![], None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .and(query_param("access_token", "expired"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 190, "message": "Error validating access token"}
        })))
        .mount(&server)
        .await;

    let mut config = test_config(&server, dir.path());
    assert!(check_token(&config).await.expect("Validation request should succeed"));

    config.token = Some("expired".to_string());
    assert!(!check_token(&config).await.expect("Validation request should succeed"));
}
