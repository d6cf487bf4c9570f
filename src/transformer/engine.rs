//! Transform Engine - bean list to observation conversion
//!
//! Runs one translation pass over the beans of a scrape, in document order.

use std::sync::Arc;

use super::dispatcher::Dispatcher;
use super::naming::IDENTITY_PREFIX;
use super::registry::MetricNameRegistry;
use super::translator::TranslationContext;
use super::Observation;
use crate::collector::BeanRecord;
use crate::config::NamingConfig;

/// Transform engine
///
/// Holds the dispatcher and the process-wide name registry. Cloning is
/// cheap and every clone shares the registry.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    dispatcher: Arc<Dispatcher>,
    registry: Arc<MetricNameRegistry>,
}

impl TransformEngine {
    /// Create an engine from a dispatcher and a registry
    ///
    /// # Example
    ///
    /// ```ignore
    /// use std::sync::Arc;
    /// use hadoop_jmx_exporter::transformer::{Dispatcher, MetricNameRegistry, TransformEngine};
    ///
    /// let engine = TransformEngine::new(Dispatcher::default(), Arc::new(MetricNameRegistry::new()));
    /// ```
    pub fn new(dispatcher: Dispatcher, registry: Arc<MetricNameRegistry>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            registry,
        }
    }

    /// Create an engine from naming configuration with a fresh registry
    pub fn from_config(naming: &NamingConfig) -> Self {
        Self::new(
            Dispatcher::with_region_server_beans(naming.region_server_beans.iter().cloned()),
            Arc::new(MetricNameRegistry::with_numbering(naming.suffix_numbering)),
        )
    }

    /// The shared name registry
    pub fn registry(&self) -> &Arc<MetricNameRegistry> {
        &self.registry
    }

    /// The translator dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Translate every Hadoop bean into observations
    ///
    /// Beans whose identity does not start with `Hadoop:` are skipped.
    /// Observations keep the order of the input beans.
    pub fn transform(&self, beans: &[BeanRecord], module: Option<&str>) -> Vec<Observation> {
        let ctx = TranslationContext::new(&self.registry, module);
        let mut observations = Vec::new();

        for bean in beans {
            if !bean.identity().starts_with(IDENTITY_PREFIX) {
                tracing::trace!(identity = %bean.identity(), "Skipping non-Hadoop bean");
                continue;
            }

            let translated = self
                .dispatcher
                .translator_for(bean.identity())
                .translate(bean, &ctx);
            observations.extend(translated);
        }

        tracing::debug!(
            beans = beans.len(),
            observations = observations.len(),
            "Translation pass complete"
        );

        observations
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new(Dispatcher::default(), Arc::new(MetricNameRegistry::new()))
    }
}
