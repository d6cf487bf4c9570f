//! Prometheus Exposition Format output
//!
//! This module handles formatting of observations into the text
//! exposition format (version 0.0.4).
//!
//! # Format Specification
//!
//! ```text
//! # HELP <metric_name> <help_text>
//! # TYPE <metric_name> <type>
//! <metric_name>{<label1>="<value1>",<label2>="<value2>"} <value>
//! ```

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::Observation;

/// Every Hadoop observation is exported as a counter
const SAMPLE_TYPE: &str = "counter";

static METRIC_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_:][a-zA-Z0-9_:]*$").expect("invalid metric name regex"));

static LABEL_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("invalid label name regex"));

/// Prometheus exposition format formatter
///
/// # Example
///
/// ```ignore
/// use hadoop_jmx_exporter::transformer::{Observation, PrometheusFormatter};
///
/// let observations = vec![Observation::new("Hadoop_NameNode_BlocksTotal", Default::default(), 42.0)];
/// let output = PrometheusFormatter::new().format(&observations);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrometheusFormatter;

impl PrometheusFormatter {
    /// Create a new formatter
    pub fn new() -> Self {
        Self
    }

    /// Format observations into Prometheus exposition format
    ///
    /// - HELP (the metric name) and TYPE lines are emitted once per name
    /// - Names keep the order of their first occurrence
    /// - Labels are sorted alphabetically
    /// - Observations with names or label names Prometheus rejects, and
    ///   repeats of an already emitted series, are dropped
    pub fn format(&self, observations: &[Observation]) -> String {
        if observations.is_empty() {
            return String::new();
        }

        let mut output = String::with_capacity(observations.len() * 100);

        for (name, group) in Self::group_by_name(&Self::exportable(observations)) {
            output.push_str(&format!("# HELP {} {}\n", name, Self::escape_help(&name)));
            output.push_str(&format!("# TYPE {} {}\n", name, SAMPLE_TYPE));

            for observation in group {
                output.push_str(&Self::format_sample_line(observation));
                output.push('\n');
            }
        }

        output
    }

    /// Observations that can be exported, first occurrence of each series only
    fn exportable(observations: &[Observation]) -> Vec<&Observation> {
        let mut seen: HashSet<String> = HashSet::new();

        observations
            .iter()
            .filter(|o| {
                if !METRIC_NAME_RE.is_match(&o.name) {
                    warn!(name = %o.name, "Dropping observation with invalid metric name");
                    return false;
                }
                if let Some(label) = o.labels.keys().find(|k| !LABEL_NAME_RE.is_match(k)) {
                    warn!(name = %o.name, label = %label, "Dropping observation with invalid label name");
                    return false;
                }
                let series = Self::format_series(o);
                if !seen.insert(series.clone()) {
                    warn!(series = %series, "Dropping duplicate series");
                    return false;
                }
                true
            })
            .collect()
    }

    /// Group observations by name, preserving order of first occurrence
    fn group_by_name<'a>(observations: &[&'a Observation]) -> Vec<(String, Vec<&'a Observation>)> {
        let mut groups: HashMap<&'a str, Vec<&'a Observation>> = HashMap::new();
        let mut order: Vec<&'a str> = Vec::new();

        for &observation in observations {
            if !groups.contains_key(observation.name.as_str()) {
                order.push(&observation.name);
            }
            groups
                .entry(observation.name.as_str())
                .or_default()
                .push(observation);
        }

        order
            .into_iter()
            .filter_map(|name| groups.remove(name).map(|g| (name.to_string(), g)))
            .collect()
    }

    /// Name and label block identifying a series
    fn format_series(observation: &Observation) -> String {
        let mut series = observation.name.clone();

        if !observation.labels.is_empty() {
            let label_pairs: Vec<String> = observation
                .labels
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, Self::escape_label_value(v)))
                .collect();

            series.push('{');
            series.push_str(&label_pairs.join(","));
            series.push('}');
        }

        series
    }

    /// Format a single sample line
    fn format_sample_line(observation: &Observation) -> String {
        let mut line = Self::format_series(observation);
        line.push(' ');
        line.push_str(&Self::format_value(observation.value));
        line
    }

    /// Format a numeric value for Prometheus
    ///
    /// - NaN → "NaN"
    /// - +Inf → "+Inf"
    /// - -Inf → "-Inf"
    /// - Integers are formatted without decimal point
    /// - Large/small floats use scientific notation
    pub fn format_value(value: f64) -> String {
        if value.is_nan() {
            "NaN".to_string()
        } else if value.is_infinite() {
            if value.is_sign_positive() {
                "+Inf".to_string()
            } else {
                "-Inf".to_string()
            }
        } else if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else if value.abs() >= 1e6 || (value.abs() < 1e-3 && value != 0.0) {
            format!("{:e}", value)
        } else {
            format!("{}", value)
        }
    }

    /// Escape help text
    fn escape_help(help: &str) -> String {
        help.replace('\\', "\\\\").replace('\n', "\\n")
    }

    /// Escape label value
    fn escape_label_value(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len());
        for c in value.chars() {
            match c {
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                '\n' => escaped.push_str("\\n"),
                _ => escaped.push(c),
            }
        }
        escaped
    }
}
