//! Configuration management for hadoop-jmx-exporter
//!
//! Handles loading and validating configuration from YAML files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::collector::parse_target;
use crate::transformer::{SuffixNumbering, DEFAULT_REGION_SERVER_BEANS};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Error parsing the configuration file
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default scrape target
    #[serde(default)]
    pub hadoop: HadoopConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Metric naming behavior
    #[serde(default)]
    pub naming: NamingConfig,
}

/// Default scrape target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HadoopConfig {
    /// JMX servlet URL used when a scrape carries no `target` parameter
    #[serde(default = "default_hadoop_url")]
    pub url: String,

    /// Module name appended to every metric prefix when a scrape carries
    /// no `module` parameter
    #[serde(default)]
    pub module: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Additional attempts for retryable fetch failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Metrics endpoint path
    #[serde(default = "default_metrics_path")]
    pub path: String,

    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

/// Metric naming configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Collision suffix numbering scheme
    #[serde(default)]
    pub suffix_numbering: SuffixNumbering,

    /// Bean identities translated with the HBase region-server decoder
    #[serde(default = "default_region_server_beans")]
    pub region_server_beans: Vec<String>,
}

// Default value functions
fn default_hadoop_url() -> String {
    "http://localhost:50070/jmx".to_string()
}

fn default_timeout() -> u64 {
    5000
}

fn default_max_retries() -> u32 {
    2
}

fn default_port() -> u16 {
    8288
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_region_server_beans() -> Vec<String> {
    DEFAULT_REGION_SERVER_BEANS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for HadoopConfig {
    fn default() -> Self {
        Self {
            url: default_hadoop_url(),
            module: String::new(),
            timeout_ms: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            path: default_metrics_path(),
            bind_address: default_bind_address(),
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            suffix_numbering: SuffixNumbering::default(),
            region_server_beans: default_region_server_beans(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed. The result is
    /// not validated so command-line overrides can still correct it; call
    /// [`Config::validate`] once they are applied.
    /// Use `Config::load_or_default()` for optional configuration files.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a YAML file, falling back to defaults if not found
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        Self::load(path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if !self.server.path.starts_with('/') {
            return Err(ConfigError::ValidationError(
                "Metrics path must start with '/'".to_string(),
            ));
        }

        if self.server.path == "/" || self.server.path == "/health" {
            return Err(ConfigError::ValidationError(format!(
                "Metrics path '{}' conflicts with a built-in route",
                self.server.path
            )));
        }

        if self.hadoop.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "Hadoop timeout_ms must be greater than 0".to_string(),
            ));
        }

        parse_target(&self.hadoop.url)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        Ok(())
    }
}
