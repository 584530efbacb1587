//! Provider registry.
//!
//! Caches live provider instances keyed by identifier. Construction on a
//! cache miss is serialized per identifier, so concurrent first-time
//! requests for one model construct exactly once while requests for other
//! models proceed independently. The cache-map lock is never held while a
//! constructor runs, and a failed construction leaves no entry behind.

use crate::discovery::Constructor;
use crate::factory::Factory;
use compact_str::CompactString;
use mcore::{ModelInfo, Provider, ProviderConfigError};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Cache of live provider instances, keyed by identifier.
pub struct Registry {
    factory: Factory,
    providers: RwLock<BTreeMap<CompactString, Arc<dyn Provider>>>,
    /// Constructor overrides for exact identifiers, consulted before the
    /// factory's discovery table.
    overrides: RwLock<BTreeMap<CompactString, Constructor>>,
    /// Per-identifier construction locks. Entries live for the registry
    /// lifetime; `unregister` clears them.
    building: Mutex<BTreeMap<CompactString, Arc<Mutex<()>>>>,
}

impl Registry {
    /// Create a registry over the given factory.
    pub fn new(factory: Factory) -> Self {
        Self {
            factory,
            providers: RwLock::new(BTreeMap::new()),
            overrides: RwLock::new(BTreeMap::new()),
            building: Mutex::new(BTreeMap::new()),
        }
    }

    /// Fetch the provider for `info.id`, constructing it on first use.
    ///
    /// On a cache hit the stored instance is authoritative and the
    /// incoming `info` is ignored beyond its identifier — re-registration
    /// does not hot-swap configuration. Use [`Registry::unregister`] to
    /// force a rebuild.
    pub fn get_or_create(&self, info: &ModelInfo) -> Result<Arc<dyn Provider>, ProviderConfigError> {
        let key = info.id.as_str();
        if let Some(provider) = self.providers.read().get(key) {
            tracing::trace!(id = key, "registry hit");
            return Ok(provider.clone());
        }

        // Serialize construction per identifier. The slot map lock is
        // released before the slot itself is acquired, so construction
        // for one identifier never blocks lookups or other identifiers.
        let slot = {
            let mut building = self.building.lock();
            building
                .entry(CompactString::from(key))
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let _guard = slot.lock();

        // A concurrent caller may have finished while we waited.
        if let Some(provider) = self.providers.read().get(key) {
            return Ok(provider.clone());
        }

        let provider = self.build(info)?;
        self.providers
            .write()
            .insert(CompactString::from(key), provider.clone());
        tracing::debug!(id = key, "registered provider");
        Ok(provider)
    }

    /// Pre-seed a constructor for an exact identifier.
    ///
    /// The next `get_or_create` for that identifier uses this constructor
    /// instead of the discovery table. Intended for test doubles and
    /// backends not present in discovery.
    pub fn register(&self, id: impl Into<CompactString>, ctor: Constructor) {
        self.overrides.write().insert(id.into(), ctor);
    }

    /// Drop the cached instance for an identifier. A later
    /// `get_or_create` reconstructs from scratch; constructor overrides
    /// survive, like the discovery table itself.
    pub fn unregister(&self, id: &str) {
        self.providers.write().remove(id);
        self.building.lock().remove(id);
    }

    /// Whether a live instance exists for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.providers.read().contains_key(id)
    }

    /// Identifiers with live instances, in stable order.
    pub fn identifiers(&self) -> Vec<CompactString> {
        self.providers.read().keys().cloned().collect()
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }

    fn build(&self, info: &ModelInfo) -> Result<Arc<dyn Provider>, ProviderConfigError> {
        let ctor = self.overrides.read().get(info.id.as_str()).cloned();
        match ctor {
            Some(ctor) => {
                info.validate()?;
                (ctor)(info.clone(), self.factory.client().clone()).map_err(|source| {
                    ProviderConfigError::Construction {
                        id: info.id.clone(),
                        provider: info.id.provider().into(),
                        source,
                    }
                })
            }
            None => self.factory.create(info),
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("count", &self.len())
            .finish()
    }
}
