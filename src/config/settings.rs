//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
///
/// Assembled once at process start and passed into construction; nothing
/// reads configuration ad hoc after that.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_gateway_server")]
    pub gateway: ServerConfig,
    #[serde(default = "default_backend_server")]
    pub backend: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bind address for one of the two services
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_gateway_server() -> ServerConfig {
    ServerConfig {
        host: default_host(),
        port: 5000,
    }
}

fn default_backend_server() -> ServerConfig {
    ServerConfig {
        host: default_host(),
        port: 5001,
    }
}

/// Upstream target the gateway forwards to, resolved at startup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
        }
    }
}

fn default_upstream_base_url() -> String {
    "http://backend-service:5001".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/default.toml")
    }

    /// Load settings from a specific configuration file path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            // Start with default values
            .set_default("gateway.host", "0.0.0.0")?
            .set_default("gateway.port", 5000)?
            .set_default("backend.host", "0.0.0.0")?
            .set_default("backend.port", 5001)?
            .set_default("upstream.base_url", default_upstream_base_url())?
            .set_default("logging.level", "info")?
            // Load from configuration file
            .add_source(
                File::with_name(path.as_ref().to_str().unwrap_or("config/default"))
                    .required(false),
            )
            // Override with environment variables (prefixed with CHAOS_DEMO_)
            .add_source(
                Environment::with_prefix("CHAOS_DEMO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.gateway.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Gateway port cannot be 0".to_string(),
            )));
        }
        if self.backend.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Backend port cannot be 0".to_string(),
            )));
        }
        if self.upstream.base_url.is_empty() {
            return Err(AppError::Config(config::ConfigError::Message(
                "Upstream base URL cannot be empty".to_string(),
            )));
        }
        if !self.upstream.base_url.starts_with("http://")
            && !self.upstream.base_url.starts_with("https://")
        {
            return Err(AppError::Config(config::ConfigError::Message(format!(
                "Upstream base URL '{}' must be an http(s) URL",
                self.upstream.base_url
            ))));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gateway: default_gateway_server(),
            backend: default_backend_server(),
            upstream: UpstreamConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
