//! Tests for the auth module

use super::*;
use crate::error::{AuthFailure, Error};
use crate::http::{HttpClient, HttpClientConfig};
use reqwest::StatusCode;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// AuthHeader Tests
// ============================================================================

#[test]
fn test_auth_header_apply() {
    let auth = AuthHeader::new("app-id", "test-key-123");

    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(built.headers().get("app-id").unwrap(), "test-key-123");
}

#[test]
fn test_auth_header_debug_redacts_value() {
    let auth = AuthHeader::new("app-id", "very-secret");
    let debug = format!("{auth:?}");
    assert!(debug.contains("app-id"));
    assert!(!debug.contains("very-secret"));
}

// ============================================================================
// Classification Tests
// ============================================================================

#[test_case(200, "", Ok(()) ; "ok")]
#[test_case(403, r#"{"error":"APP_ID_NOT_EXIST"}"#, Err(AuthFailure::InvalidToken) ; "invalid token")]
#[test_case(403, r#"{"error":"APP_ID_MISSING"}"#, Err(AuthFailure::MissingToken) ; "missing token")]
#[test_case(403, r#"{"error":{"error":"APP_ID_MISSING"}}"#, Err(AuthFailure::MissingToken) ; "nested error code")]
#[test_case(403, r#"{"error":"SOMETHING_ELSE"}"#, Err(AuthFailure::GenericConnectionFailure) ; "unknown 403 code")]
#[test_case(403, "not json", Err(AuthFailure::GenericConnectionFailure) ; "unparseable 403 body")]
#[test_case(404, "", Err(AuthFailure::ServerUnreachable) ; "not found")]
#[test_case(500, "", Err(AuthFailure::GenericConnectionFailure) ; "server error")]
#[test_case(401, "", Err(AuthFailure::GenericConnectionFailure) ; "unauthorized")]
#[test_case(204, "", Err(AuthFailure::GenericConnectionFailure) ; "non 200 success")]
fn test_classify_response(status: u16, body: &str, expected: Result<(), AuthFailure>) {
    let status = StatusCode::from_u16(status).unwrap();
    assert_eq!(classify_response(status, body), expected);
}

// ============================================================================
// check_connection Tests
// ============================================================================

async fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    HttpClient::with_auth(config, AuthHeader::new("app-id", "token-1")).unwrap()
}

#[tokio::test]
async fn test_check_connection_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("app-id", "token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "u1"}], "page": 0, "total": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    assert!(check_connection(&client).await.is_ok());
}

#[tokio::test]
async fn test_check_connection_invalid_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"error": "APP_ID_NOT_EXIST"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = check_connection(&client).await.unwrap_err();
    assert_eq!(err.auth_failure(), Some(AuthFailure::InvalidToken));
}

#[tokio::test]
async fn test_check_connection_missing_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "APP_ID_MISSING"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = check_connection(&client).await.unwrap_err();
    assert_eq!(err.auth_failure(), Some(AuthFailure::MissingToken));
}

#[tokio::test]
async fn test_check_connection_server_unreachable() {
    let mock_server = MockServer::start().await;

    // Nothing mounted: wiremock answers 404
    let client = client_for(&mock_server).await;
    let err = check_connection(&client).await.unwrap_err();
    assert_eq!(err.auth_failure(), Some(AuthFailure::ServerUnreachable));
    assert_eq!(err.to_string(), "Server does not respond");
}

#[tokio::test]
async fn test_check_connection_generic_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = check_connection(&client).await.unwrap_err();
    assert_eq!(err.auth_failure(), Some(AuthFailure::GenericConnectionFailure));
}

#[tokio::test]
async fn test_check_connection_transport_error() {
    // Port 9 (discard) on localhost is not listening
    let config = HttpClientConfig::builder()
        .base_url("http://127.0.0.1:9")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = check_connection(&client).await.unwrap_err();
    assert!(matches!(err, Error::Http(_) | Error::Timeout { .. }));
    assert_eq!(err.auth_failure(), None);
}
