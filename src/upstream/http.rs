//! HTTP upstream client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::upstream::traits::{DataUpstream, FetchError};

/// Upstream client backed by a shared HTTP connection pool.
pub struct HttpUpstream {
    client: Client,
    base_url: String,
}

impl HttpUpstream {
    /// Create a new HTTP upstream client for the given base URL.
    ///
    /// Timeouts are applied per request, not on the client, so the single
    /// forwarded call and the chain calls can carry different bounds.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn data_url(&self) -> String {
        format!("{}/data", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl DataUpstream for HttpUpstream {
    async fn fetch_data(&self, timeout: Duration) -> std::result::Result<Value, FetchError> {
        let url = self.data_url();
        debug!(url = %url, timeout_ms = timeout.as_millis() as u64, "Fetching upstream data");

        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        response.json::<Value>().await.map_err(classify)
    }
}

/// Map a transport error onto the gateway's two-class taxonomy.
fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Unavailable(err.to_string())
    }
}
