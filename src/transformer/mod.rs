//! Metric transformation module
//!
//! Converts Hadoop JMX beans into uniquely named Prometheus observations.
//!
//! Data flow for one bean:
//!
//! ```text
//! BeanRecord -> derive_name (prefix + labels)
//!            -> BeanTranslator (generic, or region-server decoding)
//!            -> MetricNameRegistry (collision-free final name)
//!            -> Observation
//! ```

pub mod dispatcher;
pub mod engine;
pub mod formatter;
pub mod naming;
pub mod region;
pub mod registry;
pub mod translator;

use std::collections::BTreeMap;

pub use dispatcher::{Dispatcher, DEFAULT_REGION_SERVER_BEANS};
pub use engine::TransformEngine;
pub use formatter::PrometheusFormatter;
pub use naming::{derive_name, label_signature, sanitize_metric_name, BeanName};
pub use region::{decode_region_key, RegionKey};
pub use registry::{MetricNameRegistry, SuffixNumbering};
pub use translator::{BeanTranslator, GenericTranslator, RegionServerTranslator, TranslationContext};

/// Label name to label value, iterated in label name order
pub type LabelSet = BTreeMap<String, String>;

/// One translated metric sample
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Final, collision-resolved metric name
    pub name: String,
    /// Labels
    pub labels: LabelSet,
    /// Metric value
    pub value: f64,
}

impl Observation {
    /// Create an observation
    pub fn new(name: impl Into<String>, labels: LabelSet, value: f64) -> Self {
        Self {
            name: name.into(),
            labels,
            value,
        }
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }
}
