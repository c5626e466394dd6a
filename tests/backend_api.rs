//! Functional tests for the backend HTTP surface

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use chaos_demo_gateway::backend_service::routes;

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = routes::create_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "backend");
}

#[tokio::test]
async fn test_data_shape() {
    let response = routes::create_router()
        .oneshot(Request::builder().uri("/data").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["service"], "backend");
    assert!(body["timestamp"].as_f64().unwrap() > 0.0);
    assert_eq!(body["data"]["total"], 3);

    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    for (i, item) in items.iter().enumerate() {
        assert_eq!(item["id"], i as u64 + 1);
        let value = item["value"].as_u64().unwrap();
        assert!((1..=100).contains(&value));
    }
    assert_eq!(items[0]["name"], "Item A");
    assert_eq!(items[1]["name"], "Item B");
    assert_eq!(items[2]["name"], "Item C");
}

#[tokio::test]
async fn test_data_shape_is_stable_across_calls() {
    let first = body_json(
        routes::create_router()
            .oneshot(Request::builder().uri("/data").body(Body::empty()).unwrap())
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        routes::create_router()
            .oneshot(Request::builder().uri("/data").body(Body::empty()).unwrap())
            .await
            .unwrap(),
    )
    .await;

    let names = |body: &Value| {
        body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["name"].as_str().unwrap().to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(names(&first), names(&second));
}

#[tokio::test]
async fn test_process_acknowledges_input() {
    let response = routes::create_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"x":1}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["service"], "backend");
    assert_eq!(body["processed"], true);
    assert_eq!(body["result"], "OK");
    assert_eq!(body["input_size"], r#"{"x":1}"#.len() as u64);
}

#[tokio::test]
async fn test_process_malformed_body_acks_empty_object() {
    let response = routes::create_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process")
                .body(Body::from("]["))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["input_size"], "{}".len() as u64);
}

#[tokio::test]
async fn test_echo_reflects_request_verbatim() {
    let payload = json!({"hello": "world", "nested": {"n": 1}});
    let response = routes::create_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo?foo=bar&n=2")
                .header("content-type", "application/json")
                .header("x-experiment", "body-corruption")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["method"], "POST");
    assert_eq!(body["body"], payload);
    assert_eq!(body["args"]["foo"], "bar");
    assert_eq!(body["args"]["n"], "2");
    assert_eq!(body["headers"]["x-experiment"], "body-corruption");
    assert_eq!(body["headers"]["content-type"], "application/json");
}

#[tokio::test]
async fn test_echo_without_json_body_reflects_null() {
    let response = routes::create_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["body"], Value::Null);
}
