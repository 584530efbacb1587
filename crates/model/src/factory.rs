//! Provider factory.
//!
//! `Factory::create` is the single validate-and-construct path: resolve
//! the provider constructor, check bounds and credentials, construct.
//! Every failure mode surfaces as a [`ProviderConfigError`] — constructor
//! errors are wrapped, never leaked raw. The factory holds no cache;
//! caching belongs to the registry.

use crate::discovery::Discovery;
use mcore::{ModelInfo, Provider, ProviderConfigError};
use reqwest::Client;
use std::sync::Arc;

/// Validates model configs and constructs provider instances.
#[derive(Clone)]
pub struct Factory {
    discovery: Discovery,
    client: Client,
}

impl Factory {
    /// Create a factory over the built-in provider table.
    pub fn new() -> Self {
        Self::with_discovery(Discovery::builtin())
    }

    /// Create a factory over a caller-supplied provider table.
    pub fn with_discovery(discovery: Discovery) -> Self {
        Self {
            discovery,
            client: Client::new(),
        }
    }

    /// The provider table this factory resolves against.
    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    /// The shared HTTP client passed to constructors.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Validate `info` and construct a provider instance for it.
    ///
    /// Construction is local and side-effect-free; no retries happen
    /// here.
    pub fn create(&self, info: &ModelInfo) -> Result<Arc<dyn Provider>, ProviderConfigError> {
        let provider_name = info.id.provider();
        let ctor = self
            .discovery
            .get(provider_name)
            .ok_or_else(|| ProviderConfigError::UnknownProvider(provider_name.into()))?;

        info.validate()?;

        tracing::debug!(id = %info.id, provider = provider_name, "constructing provider");
        (ctor)(info.clone(), self.client.clone()).map_err(|source| {
            ProviderConfigError::Construction {
                id: info.id.clone(),
                provider: provider_name.into(),
                source,
            }
        })
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("discovery", &self.discovery)
            .finish()
    }
}
