use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use mockito::{Matcher, Server};
use overfast_client::{ClientConfig, OverFastClient, RetryPolicy};
use overwatch_backend::{RateLimitConfig, create_app};
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt;

/// Helper to create the app against any upstream base URL
fn create_test_app(base_url: String) -> axum::Router {
    let client = OverFastClient::new(ClientConfig {
        base_url,
        timeout: Duration::from_secs(2),
        retry: RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1),
        },
    })
    .expect("Failed to create upstream client");
    create_app(client, Duration::from_secs(30), RateLimitConfig::default())
}

/// Helper to send a request and get response
async fn send_request(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header("x-forwarded-for", "198.51.100.1")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes();

    let json = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(json!({}))
    };

    (status, json)
}

fn assert_error_envelope(body: &Value) {
    let object = body.as_object().expect("error body should be a JSON object");
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string(), "Response should have 'error' field");
    assert!(body["timestamp"].is_string(), "Response should have 'timestamp' field");
    assert!(!object.contains_key("data"), "Error envelope must not carry data");
}

#[tokio::test]
async fn test_validation_error_envelope() {
    // GIVEN: A running application
    let upstream = Server::new_async().await;
    let app = create_test_app(upstream.url());

    // WHEN: Sending an invalid battletag
    let (status, body) = send_request(app, "/api/user/ab-12").await;

    // THEN: Should return 400 with a proper envelope
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_envelope(&body);
}

#[tokio::test]
async fn test_upstream_error_envelope() {
    // GIVEN: An upstream without the player
    let mut upstream = Server::new_async().await;
    let _mock = upstream
        .mock("GET", "/players/Nobody-0000")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;
    let app = create_test_app(upstream.url());

    // WHEN: Requesting the player
    let (status, body) = send_request(app, "/api/user/Nobody-0000/stats").await;

    // THEN: Should return 404 with a proper envelope
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_envelope(&body);
    assert_eq!(body["error"], "Player not found");
}

#[tokio::test]
async fn test_unexpected_payload_doesnt_expose_internals() {
    // GIVEN: An upstream answering 200 with a payload missing the summary
    let mut upstream = Server::new_async().await;
    let _mock = upstream
        .mock("GET", "/players/Prometheus-1252")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"stats": null}"#)
        .create_async()
        .await;
    let app = create_test_app(upstream.url());

    // WHEN: Requesting the combined data
    let (status, body) = send_request(app, "/api/user/Prometheus-1252").await;

    // THEN: Should return a generic 500
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_envelope(&body);

    let error_msg = body["error"].as_str().unwrap();
    assert_eq!(error_msg, "Internal server error");

    // Should NOT contain internal error details
    assert!(!error_msg.contains("missing field"), "Should not expose decode details");
    assert!(!error_msg.contains("serde"), "Should not expose library names");
    assert!(!error_msg.contains("panic"), "Should not expose panic details");
}

#[tokio::test]
async fn test_full_endpoint_tolerates_any_json() {
    // GIVEN: The same partial payload
    let mut upstream = Server::new_async().await;
    let _mock = upstream
        .mock("GET", "/players/Prometheus-1252")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"stats": null}"#)
        .create_async()
        .await;
    let app = create_test_app(upstream.url());

    // WHEN: Requesting the verbatim endpoint
    let (status, body) = send_request(app, "/api/user/Prometheus-1252/full").await;

    // THEN: It is forwarded as-is
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "stats": null }));
}

#[tokio::test]
async fn test_unreachable_upstream() {
    // GIVEN: An upstream nobody listens on
    let app = create_test_app("http://127.0.0.1:9".to_string());

    // WHEN: Requesting a player
    let (status, body) = send_request(app, "/api/user/Prometheus-1252").await;

    // THEN: Should return a gateway error without connection details
    assert!(
        status == StatusCode::BAD_GATEWAY || status == StatusCode::GATEWAY_TIMEOUT,
        "unexpected status {status}"
    );
    assert_error_envelope(&body);
    let error_msg = body["error"].as_str().unwrap();
    assert!(!error_msg.contains("127.0.0.1"), "Should not expose upstream address");
}

#[tokio::test]
async fn test_unreachable_upstream_search_still_succeeds() {
    // GIVEN: An upstream nobody listens on
    let app = create_test_app("http://127.0.0.1:9".to_string());

    // WHEN: Searching
    let (status, body) = send_request(app, "/api/search?name=Prometheus").await;

    // THEN: Search degrades to no results
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
}
