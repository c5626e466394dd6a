//! Trait and error types for upstream data fetches

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Transport-level failure of a single upstream fetch.
///
/// The gateway distinguishes only two classes: the call exceeded its bound,
/// or it failed in any other way before a payload was decoded.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Unavailable(String),
}

/// A source of upstream data the gateway can forward from.
///
/// Production uses [`HttpUpstream`](crate::upstream::HttpUpstream); tests
/// substitute scripted fakes so no network I/O is required.
#[async_trait]
pub trait DataUpstream: Send + Sync {
    /// Fetch the upstream data document, bounded by `timeout`.
    async fn fetch_data(&self, timeout: Duration) -> Result<Value, FetchError>;
}
