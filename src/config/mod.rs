//! Configuration module - settings loading and validation

pub mod settings;

pub use settings::{LoggingConfig, ServerConfig, Settings, UpstreamConfig};
