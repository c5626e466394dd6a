//! Backend HTTP surface

use axum::{
    body::Bytes,
    extract::Query,
    http::{HeaderMap, Method},
    routing::{get, post},
    Json, Router,
};
use rand::Rng;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tower_http::trace::TraceLayer;

use crate::error::Result;
use crate::payload::Payload;
use crate::unix_seconds;

/// Build the backend router.
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/data", get(get_data))
        .route("/process", post(process))
        .route("/echo", post(echo))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "backend" }))
}

/// One synthetic record; `value` is re-randomized on every fetch so callers
/// can detect a stale or cached response served by an intermediary.
#[derive(Debug, Clone, Serialize)]
pub struct SyntheticItem {
    pub id: u32,
    pub name: &'static str,
    pub value: u32,
}

const ITEM_NAMES: [&str; 3] = ["Item A", "Item B", "Item C"];

pub fn synthetic_items() -> Vec<SyntheticItem> {
    let mut rng = rand::thread_rng();
    ITEM_NAMES
        .into_iter()
        .enumerate()
        .map(|(i, name)| SyntheticItem {
            id: i as u32 + 1,
            name,
            value: rng.gen_range(1..=100),
        })
        .collect()
}

/// Freshly randomized sample data - target for network delay experiments
async fn get_data() -> Json<Value> {
    let items = synthetic_items();
    let total = items.len();

    Json(json!({
        "service": "backend",
        "timestamp": unix_seconds(),
        "data": {
            "items": items,
            "total": total,
        },
    }))
}

/// Diagnostic ack with the serialized size of the input
async fn process(body: Bytes) -> Result<Json<Value>> {
    let payload = Payload::from_bytes(&body);
    let input_size = serde_json::to_string(&payload)?.len();

    Ok(Json(json!({
        "service": "backend",
        "processed": true,
        "input_size": input_size,
        "result": "OK",
    })))
}

/// Reflect the request exactly as received.
///
/// The contract is strict identity: any difference between what the client
/// sent and what comes back was introduced by an intermediary.
async fn echo(
    method: Method,
    Query(args): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    let header_map: Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
            )
        })
        .collect();

    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    Json(json!({
        "method": method.as_str(),
        "headers": header_map,
        "body": body,
        "args": args,
    }))
}
