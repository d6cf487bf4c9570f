//! Metric name deduplication
//!
//! Prometheus treats metric names case-sensitively, but Hadoop daemons
//! publish attributes whose names differ only in case (`ReadRequestCount`
//! vs `readRequestCount`), and one name may arrive with different label
//! sets. The registry groups sanitized names by their lowercase form and
//! numbers every distinct (name, label names) signature within a group.
//!
//! For a group whose signatures were first seen in the order s0, s1, s2:
//!
//! | signature | legacy name | ordinal name |
//! |-----------|-------------|--------------|
//! | s0        | `name`      | `name`       |
//! | s1        | `name0`     | `name1`      |
//! | s2        | `name1`     | `name2`      |
//!
//! Groups only grow, so a signature keeps its name for the life of the
//! process.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::naming::{label_signature, sanitize_metric_name};
use super::LabelSet;

/// Suffix numbering scheme for colliding signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuffixNumbering {
    /// Second signature gets `0`, third gets `1`, ...
    #[default]
    Legacy,
    /// Second signature gets `1`, third gets `2`, ...
    Ordinal,
}

impl SuffixNumbering {
    fn apply(self, name: String, position: usize) -> String {
        match (self, position) {
            (_, 0) => name,
            (SuffixNumbering::Legacy, p) => format!("{}{}", name, p - 1),
            (SuffixNumbering::Ordinal, p) => format!("{}{}", name, p),
        }
    }
}

/// Process-wide metric name registry
///
/// Shared by every scrape; lookup and append happen under one lock so two
/// concurrent scrapes cannot both claim the first slot of a group.
#[derive(Debug, Default)]
pub struct MetricNameRegistry {
    /// lowercase sanitized name -> signatures in first-seen order
    buckets: Mutex<HashMap<String, Vec<String>>>,
    numbering: SuffixNumbering,
}

impl MetricNameRegistry {
    /// Create an empty registry with legacy numbering
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given numbering
    pub fn with_numbering(numbering: SuffixNumbering) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            numbering,
        }
    }

    /// Numbering scheme in use
    pub fn numbering(&self) -> SuffixNumbering {
        self.numbering
    }

    /// Resolve the final metric name for a candidate name and label set
    ///
    /// The candidate is sanitized first; only label names take part in the
    /// signature.
    pub fn resolve(&self, candidate: &str, labels: &LabelSet) -> String {
        let name = sanitize_metric_name(candidate);
        let signature = format!("{}_{}", name, label_signature(labels));

        let position = {
            let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
            let bucket = buckets.entry(name.to_lowercase()).or_default();
            match bucket.iter().position(|s| *s == signature) {
                Some(p) => p,
                None => {
                    bucket.push(signature);
                    let p = bucket.len() - 1;
                    if p > 0 {
                        debug!(name = %name, position = p, "Metric name collision");
                    }
                    p
                }
            }
        };

        self.numbering.apply(name, position)
    }

    /// Signatures registered under the group of `name`, in first-seen order
    pub fn signatures(&self, name: &str) -> Vec<String> {
        let key = sanitize_metric_name(name).to_lowercase();
        let buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        buckets.get(&key).cloned().unwrap_or_default()
    }

    /// Number of name groups seen so far
    pub fn len(&self) -> usize {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no name has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
