//! Error types for hadoop-jmx-exporter
//!
//! This module defines the error types used throughout the application.
//! The translation core itself never fails; these cover fetching and
//! serving. Configuration errors live in `config`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Collector error
    #[error("Collector error: {0}")]
    Collector(#[from] CollectorError),
}

/// Errors raised while fetching or parsing a JMX document
#[derive(Error, Debug)]
pub enum CollectorError {
    /// Failed to build the HTTP client
    #[error("Failed to initialize HTTP client: {0}")]
    HttpClientInit(#[source] reqwest::Error),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[source] reqwest::Error),

    /// Failed to read the HTTP response body
    #[error("Failed to read HTTP response: {0}")]
    HttpResponse(#[source] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP error status: {0}")]
    HttpStatus(u16),

    /// Response body is not a JMX bean document
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Scrape target is not a usable http(s) URL
    #[error("Invalid target URL '{url}': {reason}")]
    InvalidTarget { url: String, reason: String },

    /// Request timed out.
    /// The value is the configured timeout in milliseconds, if known.
    #[error("Request timed out{}", .0.map(|ms| format!(" after {}ms", ms)).unwrap_or_default())]
    Timeout(Option<u64>),

    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

impl CollectorError {
    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CollectorError::HttpRequest(_)
                | CollectorError::HttpResponse(_)
                | CollectorError::Timeout(..)
                | CollectorError::ConnectionFailed(_)
                | CollectorError::HttpStatus(500..=599)
        )
    }

    /// Create a Timeout error with known duration
    pub fn timeout_with_duration(ms: u64) -> Self {
        CollectorError::Timeout(Some(ms))
    }
}

impl From<reqwest::Error> for CollectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not expose the configured timeout here.
            CollectorError::Timeout(None)
        } else if err.is_connect() {
            CollectorError::ConnectionFailed(err.to_string())
        } else if err.is_request() {
            CollectorError::HttpRequest(err)
        } else {
            CollectorError::HttpResponse(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, public_message, log_message) = match self {
            AppError::Collector(e @ CollectorError::InvalidTarget { .. }) => {
                (StatusCode::BAD_REQUEST, "Invalid target", e.to_string())
            }
            AppError::Collector(e) => (StatusCode::BAD_GATEWAY, "Collector error", e.to_string()),
        };

        tracing::error!(status = %status, error = %log_message, "Request failed");

        (status, public_message).into_response()
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;
