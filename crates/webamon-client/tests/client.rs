//! Mock-server tests for the HTTP client.

use serde_json::json;
use std::time::Duration;
use webamon_client::{RetryConfig, ThreatIntelApi, WebamonClient};
use webamon_core::{Plan, SearchRequest, WebamonError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client(server: &MockServer, api_key: Option<&str>) -> WebamonClient {
    WebamonClient::builder()
        .api_key(api_key.map(String::from))
        .base_url(server.uri())
        .retry(RetryConfig::disabled())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_basic_search_sends_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("search", "example.com"))
        .and(query_param("results", "domain.name"))
        .and(query_param("size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"domain": {"name": "example.com"}}],
            "total_hits": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server, None)
        .search()
        .basic("example.com", "domain.name")
        .size(5)
        .send()
        .await
        .unwrap();

    assert_eq!(response["total_hits"], 1);
}

#[tokio::test]
async fn test_api_key_header_and_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("x-api-key", "secret"))
        .and(query_param("lucene_query", "scan_status:success"))
        .and(query_param("index", "scans"))
        .and(query_param("from", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, Some("secret"));
    let request = SearchRequest::lucene("scan_status:success", "scans").from(20);
    api.run_search(&request).await.unwrap();
}

#[tokio::test]
async fn test_free_tier_never_sends_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    client(&server, None)
        .search()
        .basic("example.com", "domain.name")
        .from(20)
        .send()
        .await
        .unwrap();

    let requests: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query_pairs().all(|(k, _)| k != "from"));
    assert!(requests[0].headers.get("x-api-key").is_none());
}

#[tokio::test]
async fn test_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server, Some("bad"))
        .scan()
        .submit("example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, WebamonError::Unauthorized));
}

#[tokio::test]
async fn test_rate_limit_wording_follows_plan() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let free = client(&server, None).scan().submit("example.com").await.unwrap_err();
    assert!(matches!(free, WebamonError::RateLimited { plan: Plan::Free }));
    assert!(free.to_string().contains("free tier"));

    let pro = client(&server, Some("key")).scan().submit("example.com").await.unwrap_err();
    assert!(matches!(pro, WebamonError::RateLimited { plan: Plan::Pro }));
}

#[tokio::test]
async fn test_forbidden_without_key_is_quota() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client(&server, None).scan().screenshot("abc").await.unwrap_err();
    assert!(matches!(err, WebamonError::RateLimited { plan: Plan::Free }));

    let err = client(&server, Some("key")).scan().screenshot("abc").await.unwrap_err();
    assert!(matches!(err, WebamonError::Forbidden));
}

#[tokio::test]
async fn test_server_error_message_from_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "index unavailable"})))
        .mount(&server)
        .await;

    let err = client(&server, None).scan().submit("example.com").await.unwrap_err();
    match err {
        WebamonError::Api { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "index unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_body_is_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scan"))
        .and(query_param("submission_url", "example.com"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let response = client(&server, None).scan().submit("example.com").await.unwrap();
    assert_eq!(response, json!({}));
}

#[tokio::test]
async fn test_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"report_id": "r1"})))
        .mount(&server)
        .await;

    let api = WebamonClient::builder()
        .base_url(server.uri())
        .retry(RetryConfig::new().initial_backoff(Duration::from_millis(1)))
        .build()
        .unwrap();

    let response = api.submit_scan("example.com").await.unwrap();
    assert_eq!(response["report_id"], "r1");
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_empty_scan_target_rejected() {
    let server = MockServer::start().await;
    let err = client(&server, None).scan().submit("  ").await.unwrap_err();
    assert!(matches!(err, WebamonError::InvalidQuery(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
