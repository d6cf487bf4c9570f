//! JMX servlet HTTP client
//!
//! Async HTTP client with connection pooling, timeouts and bounded retry.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::parser::{parse_jmx_response, BeanRecord, CollectResult};
use crate::error::CollectorError;

/// JMX servlet HTTP client
///
/// The target URL is supplied per call so one client serves every scrape
/// target.
#[derive(Clone)]
pub struct JmxClient {
    client: Client,
    timeout_ms: u64,
}

/// Retry settings
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of additional attempts
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound on the delay
    pub max_delay: Duration,
    /// Delay growth factor
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Default backoff with a custom attempt budget
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }
}

/// Validate a scrape target URL
///
/// Only absolute `http` and `https` URLs are accepted.
pub fn parse_target(target: &str) -> CollectResult<Url> {
    let url = Url::parse(target).map_err(|e| CollectorError::InvalidTarget {
        url: target.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CollectorError::InvalidTarget {
            url: target.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

impl JmxClient {
    /// Create a client
    ///
    /// # Example
    /// ```ignore
    /// let client = JmxClient::new(5000)?;
    /// let beans = client.fetch_beans("http://namenode:9870/jmx").await?;
    /// ```
    pub fn new(timeout_ms: u64) -> CollectResult<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(CollectorError::HttpClientInit)?;

        Ok(Self { client, timeout_ms })
    }

    /// Configured request timeout in milliseconds
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    fn classify(&self, err: reqwest::Error) -> CollectorError {
        if err.is_timeout() {
            CollectorError::timeout_with_duration(self.timeout_ms)
        } else {
            err.into()
        }
    }

    /// Fetch and parse every bean served by `target`
    #[instrument(skip(self, target), fields(url = %target))]
    pub async fn fetch_beans(&self, target: &str) -> CollectResult<Vec<BeanRecord>> {
        let url = parse_target(target)?;

        info!(url = %url, "Fetching JMX document");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectorError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;

        let beans = parse_jmx_response(&body)?;
        debug!(beans = beans.len(), "Parsed JMX document");
        Ok(beans)
    }

    /// Fetch with exponential backoff on retryable failures
    pub async fn fetch_beans_with_retry(
        &self,
        target: &str,
        config: &RetryConfig,
    ) -> CollectResult<Vec<BeanRecord>> {
        let mut delay = config.initial_delay;
        let mut attempt = 0;

        loop {
            match self.fetch_beans(target).await {
                Ok(beans) => return Ok(beans),
                Err(e) if !e.is_retryable() || attempt >= config.max_retries => return Err(e),
                Err(e) => {
                    attempt += 1;
                    warn!(
                        attempt,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = std::cmp::min(
                        Duration::from_secs_f64(delay.as_secs_f64() * config.multiplier),
                        config.max_delay,
                    );
                }
            }
        }
    }
}
