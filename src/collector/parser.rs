//! Hadoop JMX servlet JSON parser
//!
//! Parses the `{"beans": [...]}` document served by the `/jmx` endpoint of
//! Hadoop-family daemons into [`BeanRecord`]s.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::CollectorError;

/// Collector operation result type
pub type CollectResult<T> = Result<T, CollectorError>;

/// Attribute that carries the bean identity string
pub const IDENTITY_ATTRIBUTE: &str = "name";

/// One bean as served by the JMX servlet
///
/// Attributes keep the order in which they appear in the document. The
/// `name` and `modelerType` attributes are kept as well.
#[derive(Debug, Clone, PartialEq)]
pub struct BeanRecord {
    identity: String,
    attributes: Vec<(String, AttributeValue)>,
}

impl BeanRecord {
    /// Create a bean with no attributes
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute, replacing an earlier value under the same key
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    fn insert(&mut self, key: String, value: AttributeValue) {
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Identity string, e.g. `Hadoop:service=NameNode,name=JvmMetrics`
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a single attribute
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the bean has no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Raw typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Integer
    Integer(i64),
    /// Floating point
    Float(f64),
    /// String
    String(String),
    /// Boolean
    Boolean(bool),
    /// Null
    Null,
    /// Nested object
    Object(HashMap<String, AttributeValue>),
    /// Array
    Array(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Numeric observation value
    ///
    /// Floats pass through and integers are widened. Every other type,
    /// numeric-looking strings included, yields `0.0`.
    ///
    /// # Precision Warning
    /// Integers above 2^53 lose precision when widened.
    pub fn observation_value(&self) -> f64 {
        match self {
            AttributeValue::Float(f) => *f,
            AttributeValue::Integer(i) => *i as f64,
            _ => 0.0,
        }
    }

    /// Text used when the value becomes a label value
    ///
    /// Scalars render as text; null, objects and arrays render empty.
    pub fn label_value(&self) -> String {
        match self {
            AttributeValue::String(s) => s.clone(),
            AttributeValue::Integer(i) => i.to_string(),
            AttributeValue::Float(f) => f.to_string(),
            AttributeValue::Boolean(b) => b.to_string(),
            AttributeValue::Null | AttributeValue::Object(_) | AttributeValue::Array(_) => {
                String::new()
            }
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

/// Raw document shape
#[derive(Deserialize)]
struct RawJmxDocument {
    beans: Vec<Map<String, Value>>,
}

/// Parse a JMX servlet document
///
/// Beans without a string `name` attribute are skipped.
pub fn parse_jmx_response(json: &str) -> CollectResult<Vec<BeanRecord>> {
    let raw: RawJmxDocument =
        serde_json::from_str(json).map_err(|e| CollectorError::JsonParse(e.to_string()))?;

    let mut beans = Vec::with_capacity(raw.beans.len());
    for map in raw.beans {
        if let Some(bean) = convert_bean(map)? {
            beans.push(bean);
        }
    }
    Ok(beans)
}

fn convert_bean(map: Map<String, Value>) -> CollectResult<Option<BeanRecord>> {
    let identity = match map.get(IDENTITY_ATTRIBUTE).and_then(Value::as_str) {
        Some(name) => name.to_string(),
        None => {
            tracing::debug!("Skipping bean without a name attribute");
            return Ok(None);
        }
    };

    let attributes = map
        .into_iter()
        .map(|(k, v)| Ok((k, parse_attribute_value(v)?)))
        .collect::<CollectResult<Vec<_>>>()?;

    Ok(Some(BeanRecord {
        identity,
        attributes,
    }))
}

fn parse_attribute_value(value: Value) -> CollectResult<AttributeValue> {
    match value {
        Value::Null => Ok(AttributeValue::Null),
        Value::Bool(b) => Ok(AttributeValue::Boolean(b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(AttributeValue::Integer(i))
            } else {
                Ok(AttributeValue::Float(n.as_f64().ok_or_else(|| {
                    CollectorError::JsonParse(format!("Number {} cannot be represented as f64", n))
                })?))
            }
        }
        Value::String(s) => Ok(AttributeValue::String(s)),
        Value::Array(arr) => {
            let parsed: Vec<AttributeValue> = arr
                .into_iter()
                .map(parse_attribute_value)
                .collect::<CollectResult<_>>()?;
            Ok(AttributeValue::Array(parsed))
        }
        Value::Object(map) => {
            let parsed: HashMap<String, AttributeValue> = map
                .into_iter()
                .map(|(k, v)| Ok((k, parse_attribute_value(v)?)))
                .collect::<CollectResult<_>>()?;
            Ok(AttributeValue::Object(parsed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_beans_in_document_order() {
        let json = r#"{
            "beans": [
                {
                    "name": "Hadoop:service=NameNode,name=JvmMetrics",
                    "modelerType": "JvmMetrics",
                    "tag.Context": "jvm",
                    "MemHeapUsedM": 52.5,
                    "ThreadsRunnable": 12,
                    "GcCount": 7
                },
                {
                    "name": "java.lang:type=Memory",
                    "Verbose": false
                }
            ]
        }"#;

        let beans = parse_jmx_response(json).unwrap();
        assert_eq!(beans.len(), 2);
        assert_eq!(beans[0].identity(), "Hadoop:service=NameNode,name=JvmMetrics");

        let keys: Vec<&str> = beans[0].attributes().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "modelerType",
                "tag.Context",
                "MemHeapUsedM",
                "ThreadsRunnable",
                "GcCount"
            ]
        );
        assert_eq!(
            beans[0].attribute("ThreadsRunnable"),
            Some(&AttributeValue::Integer(12))
        );
        assert_eq!(
            beans[0].attribute("MemHeapUsedM"),
            Some(&AttributeValue::Float(52.5))
        );
    }

    #[test]
    fn test_parse_skips_bean_without_name() {
        let json = r#"{"beans": [{"modelerType": "x", "A": 1}, {"name": 5}]}"#;
        let beans = parse_jmx_response(json).unwrap();
        assert!(beans.is_empty());
    }

    #[test]
    fn test_parse_nested_values() {
        let json = r#"{"beans": [{
            "name": "Hadoop:service=HBase,name=Master",
            "LiveRegionServers": ["rs1", "rs2"],
            "Composite": {"used": 3},
            "Missing": null
        }]}"#;
        let beans = parse_jmx_response(json).unwrap();
        let bean = &beans[0];
        assert!(matches!(
            bean.attribute("LiveRegionServers"),
            Some(AttributeValue::Array(items)) if items.len() == 2
        ));
        assert!(matches!(
            bean.attribute("Composite"),
            Some(AttributeValue::Object(map)) if map.contains_key("used")
        ));
        assert_eq!(bean.attribute("Missing"), Some(&AttributeValue::Null));
    }

    #[test]
    fn test_parse_rejects_non_jmx_document() {
        assert!(matches!(
            parse_jmx_response(r#"{"value": 1}"#),
            Err(CollectorError::JsonParse(_))
        ));
        assert!(matches!(
            parse_jmx_response("not json"),
            Err(CollectorError::JsonParse(_))
        ));
    }

    #[test]
    fn test_observation_value() {
        assert_eq!(AttributeValue::Float(1.5).observation_value(), 1.5);
        assert_eq!(AttributeValue::Integer(42).observation_value(), 42.0);
        assert_eq!(AttributeValue::Integer(-7).observation_value(), -7.0);
        // Non-numeric types silently become zero
        assert_eq!(AttributeValue::String("12".into()).observation_value(), 0.0);
        assert_eq!(AttributeValue::Boolean(true).observation_value(), 0.0);
        assert_eq!(AttributeValue::Null.observation_value(), 0.0);
        assert_eq!(AttributeValue::Array(vec![]).observation_value(), 0.0);
        assert_eq!(
            AttributeValue::Object(HashMap::new()).observation_value(),
            0.0
        );
    }

    #[test]
    fn test_label_value() {
        assert_eq!(AttributeValue::from("west").label_value(), "west");
        assert_eq!(AttributeValue::from(3).label_value(), "3");
        assert_eq!(AttributeValue::from(true).label_value(), "true");
        assert_eq!(AttributeValue::Null.label_value(), "");
    }

    #[test]
    fn test_with_attribute_replaces_existing_key() {
        let bean = BeanRecord::new("Hadoop:service=X")
            .with_attribute("a", 1)
            .with_attribute("b", 2)
            .with_attribute("a", 3);
        assert_eq!(bean.len(), 2);
        assert_eq!(bean.attribute("a"), Some(&AttributeValue::Integer(3)));
        let keys: Vec<&str> = bean.attributes().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
