//! Integration tests for the HTTP upstream client against a mock server

use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chaos_demo_gateway::upstream::{DataUpstream, FetchError, HttpUpstream};

#[tokio::test]
async fn test_fetch_data_returns_upstream_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "service": "backend",
            "data": { "items": [], "total": 0 }
        })))
        .mount(&server)
        .await;

    let upstream = HttpUpstream::new(server.uri()).unwrap();
    let value = upstream.fetch_data(Duration::from_secs(5)).await.unwrap();
    assert_eq!(value["service"], "backend");
    assert_eq!(value["data"]["total"], 0);
}

#[tokio::test]
async fn test_unreachable_upstream_is_classified_unavailable() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server); // the port is closed from here on

    let upstream = HttpUpstream::new(uri).unwrap();
    let err = upstream
        .fetch_data(Duration::from_secs(5))
        .await
        .unwrap_err();

    match err {
        FetchError::Unavailable(description) => assert!(!description.is_empty()),
        FetchError::Timeout => panic!("connection refusal must not classify as timeout"),
    }
}

#[tokio::test]
async fn test_slow_upstream_is_classified_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(serde_json::json!({"service": "backend"})),
        )
        .mount(&server)
        .await;

    let upstream = HttpUpstream::new(server.uri()).unwrap();
    let err = upstream
        .fetch_data(Duration::from_millis(100))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout));
}

#[tokio::test]
async fn test_undecodable_body_is_classified_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let upstream = HttpUpstream::new(server.uri()).unwrap();
    let err = upstream
        .fetch_data(Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Unavailable(_)));
}
