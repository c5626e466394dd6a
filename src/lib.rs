//! Chaos Demo Harness
//!
//! A two-tier demo system for validating fault-injection tooling: a gateway
//! that forwards requests to an upstream backend service and reports per-call
//! timing and failure behavior, plus the backend stub it forwards to.

pub mod backend_service;
pub mod config;
pub mod error;
pub mod gateway;
pub mod payload;
pub mod upstream;

pub use error::{AppError, Result};

use std::sync::Arc;

use crate::config::Settings;
use crate::upstream::DataUpstream;

/// Application state shared across all gateway handlers
///
/// Constructed once at startup; the upstream client sits behind a trait
/// object so tests can substitute a fake without network I/O.
pub struct AppState {
    pub settings: Settings,
    pub upstream: Arc<dyn DataUpstream>,
}

/// Unix timestamp in fractional seconds, the wire format for all reported
/// timestamps.
pub(crate) fn unix_seconds() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
