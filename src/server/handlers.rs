//! HTTP request handlers
//!
//! Contains handlers for all HTTP endpoints.

use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::AppState;
use crate::error::AppResult;
use crate::transformer::PrometheusFormatter;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Health status
    status: String,
    /// Application version
    version: String,
}

/// Per-scrape overrides
#[derive(Debug, Default, Deserialize)]
pub struct ScrapeParams {
    /// JMX servlet URL to scrape instead of the configured one
    pub target: Option<String>,
    /// Module name to use instead of the configured one
    pub module: Option<String>,
}

/// Root endpoint - displays basic info
pub async fn root(State(state): State<AppState>) -> Html<String> {
    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Hadoop JMX Exporter</title>
</head>
<body>
    <h1>Hadoop JMX Exporter</h1>
    <p>Version: {}</p>
    <ul>
        <li><a href="/health">Health Check</a></li>
        <li><a href="{}">Metrics</a></li>
    </ul>
</body>
</html>"#,
        env!("CARGO_PKG_VERSION"),
        state.config.server.path
    );
    Html(html)
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Metrics endpoint - fetches one JMX document and returns Prometheus format
#[instrument(skip(state), name = "metrics_handler")]
pub async fn metrics(
    State(state): State<AppState>,
    Query(params): Query<ScrapeParams>,
) -> AppResult<impl IntoResponse> {
    let start = Instant::now();

    let target = params
        .target
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| state.config.hadoop.url.clone());
    let module = params
        .module
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| state.config.hadoop.module.clone());

    let beans = state
        .client
        .fetch_beans_with_retry(&target, &state.retry)
        .await?;

    let observations = state.engine.transform(&beans, Some(&module));

    let mut output = PrometheusFormatter::new().format(&observations);

    let scrape_duration = start.elapsed().as_secs_f64();
    output.push_str(&format!(
        r#"# HELP hadoop_exporter_info Hadoop JMX exporter information
# TYPE hadoop_exporter_info gauge
hadoop_exporter_info{{version="{}"}} 1
# HELP hadoop_exporter_scrape_duration_seconds Time spent scraping the target
# TYPE hadoop_exporter_scrape_duration_seconds gauge
hadoop_exporter_scrape_duration_seconds {}
# HELP hadoop_exporter_metrics_scraped Number of observations translated from the target
# TYPE hadoop_exporter_metrics_scraped gauge
hadoop_exporter_metrics_scraped {}
"#,
        env!("CARGO_PKG_VERSION"),
        scrape_duration,
        observations.len()
    ));

    debug!(
        target_url = %target,
        module = %module,
        beans = beans.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        metrics_count = observations.len(),
        "Scrape complete"
    );

    Ok((
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        output,
    ))
}
