//! SERP client tests against a mock HTTP server.

use std::time::Duration;

use pretty_assertions::assert_eq;
use scout::search::{SearchBackend, SearchFailureKind, SearchOutcome, SerpClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SerpClient {
    SerpClient::new("serp-token", Some("test_zone".to_string()))
        .expect("client")
        .with_base_url(&server.uri())
}

fn failure_kind(outcome: SearchOutcome) -> SearchFailureKind {
    match outcome {
        SearchOutcome::Failed(failure) => failure.kind,
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn search_posts_fetch_request_and_unwraps_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request"))
        .and(query_param("brd_json", "1"))
        .and(header("authorization", "Bearer serp-token"))
        .and(body_json(json!({
            "zone": "test_zone",
            "url": "https://www.google.com/search?q=tokyo+weather+today&hl=en&gl=us",
            "format": "json",
            "data_format": "parsed_light"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status_code": 200,
            "body": { "organic": [{ "title": "Tokyo", "snippet": "18°C" }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client(&server).search("tokyo weather today").await;

    assert_eq!(
        outcome.into_value(),
        json!({ "organic": [{ "title": "Tokyo", "snippet": "18°C" }] })
    );
}

#[tokio::test]
async fn response_without_envelope_is_returned_whole() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "organic": [{ "title": "raw" }] })),
        )
        .mount(&server)
        .await;

    let outcome = client(&server).search("q").await;

    assert_eq!(
        outcome.into_value(),
        json!({ "organic": [{ "title": "raw" }] })
    );
}

#[tokio::test]
async fn unauthorized_is_a_distinct_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client(&server).search("q").await;

    match outcome {
        SearchOutcome::Failed(failure) => {
            assert!(failure.is_authentication());
            assert!(failure.message.contains("authentication failed"));
        }
        other => panic!("expected auth failure, got {other:?}"),
    }
}

#[tokio::test]
async fn other_http_errors_are_generic_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let outcome = client(&server).search("q").await;

    assert_eq!(
        outcome.clone().into_value(),
        json!({ "error": "API returned status 502" })
    );
    assert_eq!(failure_kind(outcome), SearchFailureKind::Http(502));
}

#[tokio::test]
async fn empty_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let outcome = client(&server).search("q").await;

    assert_eq!(failure_kind(outcome), SearchFailureKind::EmptyBody);
}

#[tokio::test]
async fn non_json_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let outcome = client(&server).search("q").await;

    assert_eq!(failure_kind(outcome), SearchFailureKind::Decode);
}

#[tokio::test]
async fn network_failure_never_raises() {
    let client = SerpClient::new("token", None)
        .expect("client")
        .with_base_url("http://127.0.0.1:1");

    let outcome = client.search("q").await;

    assert_eq!(failure_kind(outcome), SearchFailureKind::Transport);
}

#[tokio::test]
async fn slow_provider_fails_fast() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/request"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "body": {} }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = client(&server)
        .with_timeout(Duration::from_millis(50))
        .expect("client");
    let outcome = client.search("q").await;

    assert_eq!(failure_kind(outcome), SearchFailureKind::Transport);
}
