//! Tests for the HTTP client module

use super::client::classify_status;
use super::*;
use crate::auth::{Authenticator, Credential, SessionContext};
use crate::error::Error;
use reqwest::StatusCode;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("cover-arts/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.spotify.com")
        .timeout(Duration::from_secs(60))
        .header("Accept-Language", "en")
        .user_agent("test-agent/1.0")
        .rate_limit(RateLimiterConfig::new(5, 2))
        .build();

    assert_eq!(config.base_url, Some("https://api.spotify.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("Accept-Language"),
        Some(&"en".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(5, 2)));
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("q", "daft punk")
        .query("offset", "20")
        .query_opt("market", None::<String>)
        .query_opt("limit", Some("20"))
        .header("X-Request-Id", "abc123")
        .timeout(Duration::from_secs(10));

    assert_eq!(
        config.query,
        vec![
            ("q".to_string(), "daft punk".to_string()),
            ("offset".to_string(), "20".to_string()),
            ("limit".to_string(), "20".to_string()),
        ]
    );
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
}

#[test]
fn test_classify_status() {
    assert!(matches!(
        classify_status(StatusCode::UNAUTHORIZED, String::new(), None),
        Error::Unauthorized { .. }
    ));
    assert!(matches!(
        classify_status(StatusCode::FORBIDDEN, String::new(), None),
        Error::Unauthorized { .. }
    ));
    assert!(classify_status(StatusCode::SERVICE_UNAVAILABLE, String::new(), None).is_retryable());
    assert!(classify_status(StatusCode::REQUEST_TIMEOUT, String::new(), None).is_retryable());

    let limited = classify_status(StatusCode::TOO_MANY_REQUESTS, String::new(), Some(4));
    assert!(limited.is_retryable());
    assert_eq!(limited.retry_after(), Some(4));

    assert!(matches!(
        classify_status(StatusCode::NOT_FOUND, "gone".to_string(), None),
        Error::HttpStatus { status: 404, .. }
    ));
}

#[tokio::test]
async fn test_http_client_get_json_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "daft punk"))
        .and(query_param("type", "album"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": 42
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let data: serde_json::Value = client
        .get_json_with_config(
            "/v1/search",
            RequestConfig::new().query("q", "daft punk").query("type", "album"),
        )
        .await
        .unwrap();

    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_http_client_sends_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("Authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();
    let auth = Authenticator::new(SessionContext::new("u", Credential::new("session-token")));
    let client = HttpClient::with_auth(config, auth).unwrap();

    let response = client.get("/v1/me").await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_expired_session_never_hits_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();
    let session = SessionContext::new("u", Credential::new("stale")).expires_in(-10);
    let client = HttpClient::with_auth(config, Authenticator::new(session)).unwrap();

    let err = client.get("/v1/search").await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized { .. }));
}

#[tokio::test]
async fn test_http_client_401_is_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"status": 401, "message": "The access token expired"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get("/v1/search").await.unwrap_err();

    assert!(err.needs_reauth());
    assert!(err.to_string().contains("access token expired"));
}

#[tokio::test]
async fn test_http_client_500_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get("/v1/search").await.unwrap_err();

    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_http_client_429_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "2"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get("/v1/search").await.unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(err.retry_after(), Some(2));
}

#[tokio::test]
async fn test_http_client_404_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get("/v1/missing").await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_http_client_invalid_json_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_json::<serde_json::Value>("/v1/search")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_http_client_timeout_is_source_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(50))
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client.get("/v1/slow").await.unwrap_err();
    assert!(err.is_retryable());
    assert!(err.to_string().contains("timeout"));
}

#[tokio::test]
async fn test_http_client_absolute_url_ignores_base() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/absolute"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url("https://api.spotify.com")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client
        .get(&format!("{}/absolute", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}
