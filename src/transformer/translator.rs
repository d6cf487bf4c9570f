//! Bean translators
//!
//! A translator turns one bean into observations. The generic translator
//! emits every metric attribute; the region-server translator only emits
//! attributes carrying an encoded table key.

use tracing::trace;

use super::naming::{derive_name, BeanName, TAG_PREFIX};
use super::region::{decode_region_key, TABLE_ID_LABEL, TABLE_NAME_LABEL};
use super::registry::MetricNameRegistry;
use super::Observation;
use crate::collector::BeanRecord;

/// Attribute holding the implementing class, never a metric
const MODELER_TYPE_ATTRIBUTE: &str = "modelerType";

/// Per-scrape inputs shared by every translator call
#[derive(Debug, Clone, Copy)]
pub struct TranslationContext<'a> {
    /// Name registry shared across scrapes
    pub registry: &'a MetricNameRegistry,
    /// Module name appended to metric prefixes
    pub module: Option<&'a str>,
}

impl<'a> TranslationContext<'a> {
    /// Create a context
    pub fn new(registry: &'a MetricNameRegistry, module: Option<&'a str>) -> Self {
        Self { registry, module }
    }
}

/// Converts one bean into observations
pub trait BeanTranslator: Send + Sync {
    /// Translate `bean`, resolving names through the context registry
    fn translate(&self, bean: &BeanRecord, ctx: &TranslationContext<'_>) -> Vec<Observation>;
}

/// Whether an attribute carries a metric value rather than identity or tags
fn is_metric_attribute(key: &str) -> bool {
    key != crate::collector::IDENTITY_ATTRIBUTE
        && key != MODELER_TYPE_ATTRIBUTE
        && !key.starts_with(TAG_PREFIX)
}

/// Emits `prefix_key` for every metric attribute
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericTranslator;

impl BeanTranslator for GenericTranslator {
    fn translate(&self, bean: &BeanRecord, ctx: &TranslationContext<'_>) -> Vec<Observation> {
        let BeanName { prefix, labels } = derive_name(bean, ctx.module);

        bean.attributes()
            .filter(|(key, _)| is_metric_attribute(key))
            .map(|(key, value)| {
                let name = ctx.registry.resolve(&format!("{}_{}", prefix, key), &labels);
                Observation::new(name, labels.clone(), value.observation_value())
            })
            .collect()
    }
}

/// Decodes HBase region-server keys into `tableName`/`tableId` labels
///
/// Attributes without the `_metric_` marker are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionServerTranslator;

impl BeanTranslator for RegionServerTranslator {
    fn translate(&self, bean: &BeanRecord, ctx: &TranslationContext<'_>) -> Vec<Observation> {
        let BeanName { prefix, labels } = derive_name(bean, ctx.module);
        let mut observations = Vec::new();

        for (key, value) in bean.attributes() {
            if !is_metric_attribute(key) {
                continue;
            }

            let Some(decoded) = decode_region_key(key) else {
                trace!(identity = %bean.identity(), key = %key, "Skipping attribute without table encoding");
                continue;
            };

            // Table labels belong to this attribute only.
            let mut attribute_labels = labels.clone();
            if let Some(table_name) = decoded.table_name {
                attribute_labels.insert(TABLE_NAME_LABEL.to_string(), table_name);
            }
            if let Some(table_id) = decoded.table_id {
                attribute_labels.insert(TABLE_ID_LABEL.to_string(), table_id);
            }

            let name = ctx
                .registry
                .resolve(&format!("{}_{}", prefix, decoded.metric), &attribute_labels);
            observations.push(Observation::new(
                name,
                attribute_labels,
                value.observation_value(),
            ));
        }

        observations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::AttributeValue;

    const TABLES_BEAN: &str = "Hadoop:service=HBase,name=RegionServer,sub=Tables";

    #[test]
    fn test_generic_filters_and_names() {
        let bean = BeanRecord::new("Hadoop:service=NameNode,name=FSNamesystem")
            .with_attribute("name", "Hadoop:service=NameNode,name=FSNamesystem")
            .with_attribute("modelerType", "FSNamesystem")
            .with_attribute("tag.Context", "dfs")
            .with_attribute("tag.HAState", "active")
            .with_attribute("CapacityTotal", 1024)
            .with_attribute("BlocksTotal", 42)
            .with_attribute("Version", "3.3.6");

        let registry = MetricNameRegistry::new();
        let obs = GenericTranslator.translate(&bean, &TranslationContext::new(&registry, None));

        let names: Vec<&str> = obs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Hadoop_NameNode_CapacityTotal",
                "Hadoop_NameNode_BlocksTotal",
                "Hadoop_NameNode_Version"
            ]
        );
        assert_eq!(obs[0].value, 1024.0);
        // Strings are emitted with the zero default
        assert_eq!(obs[2].value, 0.0);
        for o in &obs {
            assert_eq!(o.labels.get("Context"), Some(&"dfs".to_string()));
            assert_eq!(o.labels.get("HAState"), Some(&"active".to_string()));
        }
    }

    #[test]
    fn test_generic_with_module() {
        let bean = BeanRecord::new("Hadoop:service=HBase,name=Master,sub=Server")
            .with_attribute("numRegionServers", 3);
        let registry = MetricNameRegistry::new();
        let obs = GenericTranslator.translate(
            &bean,
            &TranslationContext::new(&registry, Some("cluster1")),
        );
        assert_eq!(obs[0].name, "Hadoop_HBase_cluster1_numRegionServers");
        assert_eq!(obs[0].labels.get("sub"), Some(&"Server".to_string()));
    }

    #[test]
    fn test_region_server_decodes_and_scopes_labels() {
        let bean = BeanRecord::new(TABLES_BEAN)
            .with_attribute("tag.Context", "regionserver")
            .with_attribute("a_b_c_MyTable_region_1234_metric_readRequestCount", 17)
            .with_attribute("Namespace_default_table_t1_metric_writeRequestCount", 3.0)
            .with_attribute("numTables", 2);

        let registry = MetricNameRegistry::new();
        let obs = RegionServerTranslator.translate(&bean, &TranslationContext::new(&registry, None));

        assert_eq!(obs.len(), 2, "attributes without the marker are skipped");

        assert_eq!(obs[0].name, "Hadoop_HBase_readRequestCount");
        assert_eq!(obs[0].labels.get("tableName"), Some(&"MyTable".to_string()));
        assert_eq!(obs[0].labels.get("tableId"), Some(&"1234".to_string()));
        assert_eq!(obs[0].labels.get("sub"), Some(&"Tables".to_string()));
        assert_eq!(obs[0].value, 17.0);

        assert_eq!(obs[1].name, "Hadoop_HBase_writeRequestCount");
        assert!(!obs[1].labels.contains_key("tableName"));
        assert!(!obs[1].labels.contains_key("tableId"));
        assert_eq!(obs[1].value, 3.0);
    }

    #[test]
    fn test_region_server_table_named_with_region_token() {
        let bean = BeanRecord::new(TABLES_BEAN)
            .with_attribute("Namespace_default_table_my_region_region_abc123_metric_readRequestCount", 8)
            .with_attribute("Namespace_default_table_plain_region_def456_metric_readRequestCount", 9);

        let registry = MetricNameRegistry::new();
        let obs = RegionServerTranslator.translate(&bean, &TranslationContext::new(&registry, None));

        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].labels.get("tableName"), Some(&"my_region".to_string()));
        assert_eq!(obs[0].labels.get("tableId"), Some(&"abc123".to_string()));
        assert_eq!(obs[1].labels.get("tableName"), Some(&"plain".to_string()));
        assert_eq!(obs[1].labels.get("tableId"), Some(&"def456".to_string()));
        // Same label names, same signature, same name
        assert_eq!(obs[0].name, "Hadoop_HBase_readRequestCount");
        assert_eq!(obs[1].name, "Hadoop_HBase_readRequestCount");
    }

    #[test]
    fn test_region_server_signature_includes_table_labels() {
        let registry = MetricNameRegistry::new();
        let ctx = TranslationContext::new(&registry, None);

        let with_table = BeanRecord::new(TABLES_BEAN)
            .with_attribute("a_b_c_T_region_1_metric_storeCount", 1);
        let without_table = BeanRecord::new(TABLES_BEAN)
            .with_attribute("a_b_c_T_metric_storeCount", 1);

        assert_eq!(
            RegionServerTranslator.translate(&with_table, &ctx)[0].name,
            "Hadoop_HBase_storeCount"
        );
        assert_eq!(
            RegionServerTranslator.translate(&without_table, &ctx)[0].name,
            "Hadoop_HBase_storeCount0"
        );
    }

    #[test]
    fn test_region_server_keeps_identity_label_named_like_table_label() {
        let bean = BeanRecord::new("Hadoop:service=HBase,name=RegionServer,tableName=fixed")
            .with_attribute("a_b_c_T_region_1_metric_x", AttributeValue::Integer(1))
            .with_attribute("a_b_c_T_metric_y", AttributeValue::Integer(2));

        let registry = MetricNameRegistry::new();
        let obs = RegionServerTranslator.translate(&bean, &TranslationContext::new(&registry, None));
        assert_eq!(obs[0].labels.get("tableName"), Some(&"T".to_string()));
        assert_eq!(obs[1].labels.get("tableName"), Some(&"fixed".to_string()));
    }
}
