//! Metric prefix and label derivation
//!
//! A bean identity such as
//! `Hadoop:service=HBase,name=RegionServer,sub=Server` becomes the prefix
//! `Hadoop_HBase` and the label set `{sub="Server"}`. Attributes named
//! `tag.<label>` add (or overwrite) labels.

use tracing::debug;

use super::LabelSet;
use crate::collector::BeanRecord;

/// Literal prefix of every Hadoop bean identity
pub const IDENTITY_PREFIX: &str = "Hadoop:";

/// Attribute key prefix marking a label-valued attribute
pub const TAG_PREFIX: &str = "tag.";

/// First prefix part of every derived metric name
const PREFIX_ROOT: &str = "Hadoop";

/// Prefix and bean-level labels derived from one bean
#[derive(Debug, Clone, PartialEq)]
pub struct BeanName {
    /// Metric name prefix, e.g. `Hadoop_HBase_RegionServer`
    pub prefix: String,
    /// Labels shared by every observation of the bean
    pub labels: LabelSet,
}

/// Derive the metric prefix and label set of a bean
///
/// `service` segments extend the prefix, the `name` segment is dropped and
/// every other `key=value` segment becomes a label. `tag.*` attributes are
/// applied afterwards and win over identity labels. A non-empty `module`
/// is appended to the prefix.
///
/// Segments without `=` carry no key and are skipped.
pub fn derive_name(bean: &BeanRecord, module: Option<&str>) -> BeanName {
    let identity = bean.identity();
    let properties = identity.strip_prefix(IDENTITY_PREFIX).unwrap_or(identity);

    let mut parts = vec![PREFIX_ROOT];
    let mut labels = LabelSet::new();

    for segment in properties.split(',') {
        let Some((key, value)) = segment.split_once('=') else {
            debug!(identity = %identity, segment = %segment, "Skipping identity segment without '='");
            continue;
        };

        match key {
            "service" => parts.push(value),
            "name" => {}
            _ => {
                labels.insert(key.to_string(), value.to_string());
            }
        }
    }

    for (key, value) in bean.attributes() {
        if let Some(label) = key.strip_prefix(TAG_PREFIX) {
            labels.insert(label.to_string(), value.label_value());
        }
    }

    let mut prefix = parts.join("_");
    if let Some(module) = module.filter(|m| !m.is_empty()) {
        prefix.push('_');
        prefix.push_str(module);
    }

    BeanName { prefix, labels }
}

/// Replace characters that may not appear in a metric name
///
/// `(` and `)` are deleted; `.`, `-` and `:` become `_`. Nothing else is
/// touched.
pub fn sanitize_metric_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '(' | ')' => {}
            '.' | '-' | ':' => sanitized.push('_'),
            _ => sanitized.push(c),
        }
    }
    sanitized
}

/// Sorted, `_`-joined label names
pub fn label_signature(labels: &LabelSet) -> String {
    labels.keys().map(String::as_str).collect::<Vec<_>>().join("_")
}
