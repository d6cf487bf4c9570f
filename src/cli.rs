//! CLI argument parsing
//!
//! This module provides the command-line interface using clap derive macros.
//!
//! # Options
//!
//! - `--config` / `-c`: Configuration file path (default: config.yaml, env: HADOOP_EXPORTER_CONFIG)
//! - `--port` / `-p`: Server port (env: HADOOP_EXPORTER_PORT)
//! - `--bind-address`: Server bind address (env: HADOOP_EXPORTER_BIND_ADDRESS)
//! - `--metrics-path`: Metrics endpoint path (env: HADOOP_EXPORTER_METRICS_PATH)
//! - `--target`: Default JMX servlet URL (env: HADOOP_EXPORTER_TARGET)
//! - `--module`: Default module name appended to metric prefixes (env: HADOOP_EXPORTER_MODULE)
//! - `--timeout`: HTTP timeout in milliseconds (env: HADOOP_EXPORTER_TIMEOUT)
//! - `--validate`: Validate configuration without starting server
//! - `--log-level` / `-l`: Log level (trace/debug/info/warn/error, env: HADOOP_EXPORTER_LOG_LEVEL)
//!
//! # Precedence
//!
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;

/// hadoop-jmx-exporter - Prometheus exporter for Hadoop JMX servlets
///
/// Scrapes the `/jmx` servlet of a Hadoop, HBase or YARN daemon and
/// exports every numeric bean attribute in Prometheus format.
#[derive(Parser, Debug)]
#[command(name = "hadoop-jmx-exporter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config.yaml",
        env = "HADOOP_EXPORTER_CONFIG"
    )]
    pub config: PathBuf,

    /// Server port (overrides config file)
    #[arg(short, long, value_name = "PORT", env = "HADOOP_EXPORTER_PORT")]
    pub port: Option<u16>,

    /// Server bind address (overrides config file)
    /// Supported values: IP addresses (0.0.0.0, 127.0.0.1, ::1) or "localhost"
    #[arg(long, value_name = "ADDRESS", env = "HADOOP_EXPORTER_BIND_ADDRESS")]
    pub bind_address: Option<String>,

    /// Metrics endpoint path (overrides config file)
    /// Must start with '/' and not conflict with '/' or '/health'
    #[arg(long, value_name = "PATH", env = "HADOOP_EXPORTER_METRICS_PATH")]
    pub metrics_path: Option<String>,

    /// Default JMX servlet URL, e.g. http://namenode:50070/jmx (overrides config file)
    #[arg(long, value_name = "URL", env = "HADOOP_EXPORTER_TARGET")]
    pub target: Option<String>,

    /// Default module name appended to metric prefixes (overrides config file)
    #[arg(long, value_name = "NAME", env = "HADOOP_EXPORTER_MODULE")]
    pub module: Option<String>,

    /// JMX HTTP timeout in milliseconds (overrides config file)
    #[arg(long, value_name = "MS", env = "HADOOP_EXPORTER_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Validate configuration without starting server
    #[arg(long)]
    pub validate: bool,

    /// Log level
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        env = "HADOOP_EXPORTER_LOG_LEVEL"
    )]
    pub log_level: LogLevel,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref bind_address) = self.bind_address {
            config.server.bind_address = bind_address.clone();
        }
        if let Some(ref path) = self.metrics_path {
            config.server.path = path.clone();
        }
        if let Some(ref target) = self.target {
            config.hadoop.url = target.clone();
        }
        if let Some(ref module) = self.module {
            config.hadoop.module = module.clone();
        }
        if let Some(timeout) = self.timeout {
            config.hadoop.timeout_ms = timeout;
        }
    }
}

/// Log level options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level
    Debug,
    /// Info level - default
    Info,
    /// Warn level
    Warn,
    /// Error level - least verbose
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}
