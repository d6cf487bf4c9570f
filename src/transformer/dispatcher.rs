//! Translator selection by bean identity

use std::collections::HashMap;
use std::sync::Arc;

use super::translator::{BeanTranslator, GenericTranslator, RegionServerTranslator};

/// HBase region-server beans whose keys embed table identifiers
pub const DEFAULT_REGION_SERVER_BEANS: &[&str] = &[
    "Hadoop:service=HBase,name=RegionServer,sub=Regions",
    "Hadoop:service=HBase,name=RegionServer,sub=Tables",
    "Hadoop:service=HBase,name=RegionServer,sub=TableLatencies",
];

/// Maps exact identity strings to translators
///
/// Identities without a registration use the generic translator.
#[derive(Clone)]
pub struct Dispatcher {
    routes: HashMap<String, Arc<dyn BeanTranslator>>,
    fallback: Arc<dyn BeanTranslator>,
}

impl Dispatcher {
    /// Dispatcher with no registrations
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            fallback: Arc::new(GenericTranslator),
        }
    }

    /// Dispatcher routing `identities` to the region-server translator
    pub fn with_region_server_beans<I, S>(identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let region_server: Arc<dyn BeanTranslator> = Arc::new(RegionServerTranslator);
        let mut dispatcher = Self::new();
        for identity in identities {
            dispatcher.register(identity, Arc::clone(&region_server));
        }
        dispatcher
    }

    /// Route `identity` to `translator`, replacing an earlier registration
    pub fn register(&mut self, identity: impl Into<String>, translator: Arc<dyn BeanTranslator>) {
        self.routes.insert(identity.into(), translator);
    }

    /// Translator for a bean identity
    pub fn translator_for(&self, identity: &str) -> &dyn BeanTranslator {
        match self.routes.get(identity) {
            Some(translator) => translator.as_ref(),
            None => self.fallback.as_ref(),
        }
    }

    /// Whether `identity` has its own registration
    pub fn is_registered(&self, identity: &str) -> bool {
        self.routes.contains_key(identity)
    }

    /// Number of registered identities
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_region_server_beans(DEFAULT_REGION_SERVER_BEANS.iter().copied())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut identities: Vec<&String> = self.routes.keys().collect();
        identities.sort();
        f.debug_struct("Dispatcher")
            .field("routes", &identities)
            .finish()
    }
}
