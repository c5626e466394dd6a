//! Gateway HTTP surface

use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::error::Result;
use crate::gateway::forward::{self, ChainReport, ForwardReply};
use crate::payload::Payload;
use crate::{unix_seconds, AppState};

/// Build the gateway router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(home))
        .route("/api/data", get(get_data))
        .route("/api/process", post(process_data))
        .route("/api/slow", get(slow))
        .route("/api/chain", get(chain))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "frontend" }))
}

async fn home() -> Json<Value> {
    Json(json!({
        "message": "Chaos Demo App",
        "endpoints": [
            "/health - Health check",
            "/api/data - Get data (calls backend)",
            "/api/process - Process data with POST",
            "/api/slow - Intentionally slow endpoint",
            "/api/chain - Chain call to backend",
        ],
    }))
}

/// Single forwarded call - good for observing injected network delays
async fn get_data(State(state): State<Arc<AppState>>) -> Result<Json<ForwardReply>> {
    forward::forward_once(state.upstream.as_ref()).await.map(Json)
}

/// Reply for the passthrough processing endpoint.
#[derive(Debug, Serialize)]
struct ProcessReply {
    received: Payload,
    processed: bool,
    timestamp: f64,
    message: String,
}

/// Wrap an arbitrary payload with metadata and return it unchanged - good
/// for observing request/response body modification.
async fn process_data(body: Bytes) -> Json<ProcessReply> {
    let payload = Payload::from_bytes(&body);
    info!(fields = payload.field_count(), "Received data");

    let message = format!("Processed {} fields", payload.field_count());
    Json(ProcessReply {
        received: payload,
        processed: true,
        timestamp: unix_seconds(),
        message,
    })
}

#[derive(Debug, Deserialize)]
struct SlowParams {
    #[serde(default = "default_delay")]
    delay: f64,
}

fn default_delay() -> f64 {
    0.1
}

#[derive(Debug, Serialize)]
struct SlowReply {
    message: &'static str,
    intentional_delay_ms: f64,
}

/// Sleep for the requested duration - a calibration baseline against
/// externally injected delay.
async fn slow(Query(params): Query<SlowParams>) -> Json<SlowReply> {
    let delay = params.delay.max(0.0);
    tokio::time::sleep(Duration::from_secs_f64(delay)).await;

    Json(SlowReply {
        message: "Slow response",
        intentional_delay_ms: delay * 1000.0,
    })
}

/// Sequential aggregating call - good for observing partial failures.
/// Always responds 200; per-call outcomes are in the body.
async fn chain(State(state): State<Arc<AppState>>) -> Json<ChainReport> {
    Json(forward::run_chain(state.upstream.as_ref()).await)
}
