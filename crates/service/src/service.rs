//! The model service.
//!
//! `ModelService` is the one place external configuration enters: callers
//! register `ModelInfo` records, then invoke by identifier. Providers are
//! fetched or built through the registry, the call runs outside any
//! registry lock, and usage is recorded best-effort — bookkeeping never
//! changes the primary result.

use crate::usage::UsageService;
use compact_str::CompactString;
use mcore::{
    CallParams, InvocationError, ModelId, ModelInfo, ProviderConfigError, ServiceError, TokenUsage,
};
use model::Registry;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The structured result of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// Generated text.
    pub data: String,
    /// Token usage as reported by the provider (zero if unreported).
    pub usage: TokenUsage,
    /// Cost of this call, from the registered provider's pricing.
    pub cost: f64,
}

/// Routes invocations to providers and accounts for their usage.
pub struct ModelService {
    registry: Arc<Registry>,
    usage: Arc<UsageService>,
    models: RwLock<BTreeMap<CompactString, ModelInfo>>,
}

impl ModelService {
    /// Create a service over the given registry and usage accumulator.
    pub fn new(registry: Arc<Registry>, usage: Arc<UsageService>) -> Self {
        Self {
            registry,
            usage,
            models: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register (or replace) the configuration for a model.
    ///
    /// Replacing a registration does not rebuild a live provider; use
    /// [`Registry::unregister`] to force reconstruction with new config.
    pub fn register_model(&self, info: ModelInfo) {
        self.models
            .write()
            .insert(CompactString::from(info.id.as_str()), info);
    }

    /// The registered configuration for an identifier, if any.
    pub fn model_info(&self, id: &ModelId) -> Option<ModelInfo> {
        self.models.read().get(id.as_str()).cloned()
    }

    /// Identifiers with registered configuration, in stable order.
    pub fn model_ids(&self) -> Vec<CompactString> {
        self.models.read().keys().cloned().collect()
    }

    /// The registry backing this service.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The usage accumulator, for telemetry readers.
    pub fn usage(&self) -> &UsageService {
        &self.usage
    }

    /// Invoke the model named by `identifier` with an assembled prompt.
    ///
    /// `params` fields take precedence over whatever the provider stores;
    /// absent fields fall through to stored configuration. Provider-side
    /// failures are wrapped into [`InvocationError`] and not retried.
    pub async fn invoke(
        &self,
        identifier: &str,
        prompt: &str,
        params: &CallParams,
    ) -> Result<Generation, ServiceError> {
        let id = ModelId::parse(identifier)?;
        let info = self
            .model_info(&id)
            .ok_or_else(|| ProviderConfigError::UnknownModel(CompactString::from(identifier)))?;

        let provider = self.registry.get_or_create(&info)?;

        tracing::debug!(id = %id, "invoking model");
        let completion = provider
            .complete(prompt, params)
            .await
            .map_err(|source| InvocationError {
                id: id.clone(),
                source,
            })?;

        // Pricing comes from the instance the registry holds, not the
        // per-call registration map: a re-registered price takes effect
        // only once the registry entry is rebuilt.
        let cost = provider.model_info().cost.calculate(&completion.usage);
        self.usage.record(&id, &completion.usage, cost);

        Ok(Generation {
            data: completion.text,
            usage: completion.usage,
            cost,
        })
    }
}

impl std::fmt::Debug for ModelService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelService")
            .field("models", &self.models.read().len())
            .finish()
    }
}
