//! Request forwarding and sequential chain aggregation
//!
//! The decision logic of the gateway: bounded-timeout forwarding, wall-clock
//! latency measurement, failure classification, and the continue-on-error
//! chain used to observe partial failures under injected faults.

use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::upstream::{DataUpstream, FetchError};

/// Timeout bound for the single forwarded call.
pub const FORWARD_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout bound for each individual call inside the chain.
pub const CHAIN_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of sequential upstream calls the chain endpoint issues.
pub const CHAIN_FAN_OUT: u32 = 3;

/// Successful single-call forward, exposed directly to the client.
#[derive(Debug, Serialize)]
pub struct ForwardReply {
    pub source: &'static str,
    pub backend_response: Value,
    pub latency_ms: f64,
}

/// Status of one call inside the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Success,
    Failed,
}

/// Outcome of one call inside the chain.
///
/// Exactly one of `data` and `error` is present, and `latency_ms` only
/// accompanies a success; the constructors are the only way to build one.
#[derive(Debug, Serialize)]
pub struct CallOutcome {
    pub call: u32,
    pub status: CallStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallOutcome {
    fn success(call: u32, latency_ms: f64, data: Value) -> Self {
        Self {
            call,
            status: CallStatus::Success,
            latency_ms: Some(latency_ms),
            data: Some(data),
            error: None,
        }
    }

    fn failure(call: u32, error: &FetchError) -> Self {
        Self {
            call,
            status: CallStatus::Failed,
            latency_ms: None,
            data: None,
            error: Some(error.to_string()),
        }
    }
}

/// Full body of the chain endpoint.
#[derive(Debug, Serialize)]
pub struct ChainReport {
    pub chain_results: Vec<CallOutcome>,
}

/// Await `fut`, measuring elapsed wall-clock time in milliseconds.
async fn measure<F, T>(fut: F) -> (T, f64)
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let value = fut.await;
    (value, round_ms(start.elapsed()))
}

/// Milliseconds rounded to 2 decimal places, the reported precision.
fn round_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}

/// Issue the single forwarded call with the 30-second bound.
///
/// A timeout reports its latency pinned at the ceiling so callers can
/// distinguish "bound hit" from a slow success; any other transport failure
/// carries its raw description.
pub async fn forward_once(upstream: &dyn DataUpstream) -> Result<ForwardReply> {
    let (result, latency_ms) = measure(upstream.fetch_data(FORWARD_TIMEOUT)).await;

    match result {
        Ok(body) => {
            debug!(latency_ms, "Forwarded upstream call succeeded");
            Ok(ForwardReply {
                source: "frontend",
                backend_response: body,
                latency_ms,
            })
        }
        Err(FetchError::Timeout) => {
            warn!(latency_ms, "Upstream call exceeded its timeout bound");
            Err(AppError::UpstreamTimeout {
                latency_ms: FORWARD_TIMEOUT.as_millis() as f64,
            })
        }
        Err(FetchError::Unavailable(description)) => {
            warn!(error = %description, "Upstream unavailable");
            Err(AppError::UpstreamUnavailable(description))
        }
    }
}

/// Issue the chain: exactly [`CHAIN_FAN_OUT`] upstream calls, strictly one
/// after another, never concurrently.
///
/// Each call runs inside its own timeout window with its own latency sample
/// starting at its own issuance. A failed call is recorded and the next call
/// is issued immediately; the report always holds the full fan-out count of
/// outcomes, whatever mix of failures occurred.
pub async fn run_chain(upstream: &dyn DataUpstream) -> ChainReport {
    let mut chain_results = Vec::with_capacity(CHAIN_FAN_OUT as usize);

    for call in 1..=CHAIN_FAN_OUT {
        let (result, latency_ms) = measure(upstream.fetch_data(CHAIN_CALL_TIMEOUT)).await;

        let outcome = match result {
            Ok(data) => {
                debug!(call, latency_ms, "Chain call succeeded");
                CallOutcome::success(call, latency_ms, data)
            }
            Err(err) => {
                warn!(call, error = %err, "Chain call failed");
                CallOutcome::failure(call, &err)
            }
        };
        chain_results.push(outcome);
    }

    ChainReport { chain_results }
}
