//! Model configuration records.
//!
//! [`ModelInfo`] is the caller-supplied description of one addressable
//! model: identifier, display name, pricing, rate limits, and provider
//! binding details. Loading these from files is a boundary concern; this
//! module only validates shape and bounds.

use crate::error::ProviderConfigError;
use crate::id::ModelId;
use crate::provider::TokenUsage;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Cost of a model, per one thousand tokens.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelCost {
    /// Cost per 1000 prompt tokens, in USD.
    pub input_per_thousand: f64,
    /// Cost per 1000 completion tokens, in USD.
    pub output_per_thousand: f64,
}

impl ModelCost {
    /// Cost of a single call with the given token usage.
    pub fn calculate(&self, usage: &TokenUsage) -> f64 {
        (usage.prompt_tokens as f64 / 1000.0) * self.input_per_thousand
            + (usage.completion_tokens as f64 / 1000.0) * self.output_per_thousand
    }
}

/// Provider-imposed rate limits for a model.
///
/// Carried as data for callers that schedule requests; nothing in this
/// layer enforces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Maximum tokens per minute.
    pub tokens_per_minute: u64,
    /// Maximum requests per minute.
    pub requests_per_minute: u64,
}

/// Provider-level settings shared by all models of one backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name. Must match a key in the discovery table.
    pub name: CompactString,
    /// Default API key, used when the model carries no override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_api_key: Option<String>,
    /// Optional endpoint override for the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Full configuration for one addressable model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Globally unique identifier, `"<provider>:<model>"`.
    pub id: ModelId,
    /// Human-readable display name.
    pub name: String,
    /// Pricing.
    pub cost: ModelCost,
    /// Rate limits.
    pub rate_limit: RateLimit,
    /// Provider binding details.
    pub provider: ProviderInfo,
    /// Per-model API key override. Falls back to the provider default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ModelInfo {
    /// The API key to use: the model override, or the provider default.
    pub fn resolved_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .or(self.provider.default_api_key.as_deref())
    }

    /// The endpoint override for this model's provider, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.provider.base_url.as_deref()
    }

    /// Validate bounds and credential presence.
    ///
    /// Violations name the offending field. The identifier itself needs no
    /// re-check: a [`ModelId`] cannot be malformed.
    pub fn validate(&self) -> Result<(), ProviderConfigError> {
        let invalid = |field: &'static str, reason: String| ProviderConfigError::InvalidField {
            id: self.id.clone(),
            field,
            reason,
        };

        if !self.provider.name.is_empty() && self.provider.name != self.id.provider() {
            return Err(invalid(
                "provider.name",
                format!(
                    "'{}' does not match identifier provider '{}'",
                    self.provider.name,
                    self.id.provider()
                ),
            ));
        }
        if !(self.cost.input_per_thousand >= 0.0 && self.cost.input_per_thousand.is_finite()) {
            return Err(invalid(
                "cost.input_per_thousand",
                format!("must be non-negative, got {}", self.cost.input_per_thousand),
            ));
        }
        if !(self.cost.output_per_thousand >= 0.0 && self.cost.output_per_thousand.is_finite()) {
            return Err(invalid(
                "cost.output_per_thousand",
                format!("must be non-negative, got {}", self.cost.output_per_thousand),
            ));
        }
        if self.rate_limit.tokens_per_minute == 0 {
            return Err(invalid("rate_limit.tokens_per_minute", "must be positive".into()));
        }
        if self.rate_limit.requests_per_minute == 0 {
            return Err(invalid("rate_limit.requests_per_minute", "must be positive".into()));
        }
        if self.resolved_api_key().is_none_or(str::is_empty) {
            return Err(ProviderConfigError::MissingApiKey(self.id.clone()));
        }
        Ok(())
    }
}
