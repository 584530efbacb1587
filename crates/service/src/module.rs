//! The LM module.
//!
//! A reusable generation configuration — model, sampling defaults, and
//! optional persona / chain-of-thought context — with a `generate` call
//! that assembles the final prompt and delegates to the model service.
//! No network I/O happens here.

use crate::service::ModelService;
use mcore::{CallParams, ModelId, ProviderConfigError, ServiceError};
use std::sync::Arc;

/// Header line inserted before chain-of-thought text.
const COT_HEADER: &str = "# Chain of Thought:";

/// Configuration for an [`LmModule`].
///
/// Immutable once the module is constructed; per-call overrides never
/// mutate it.
#[derive(Debug, Clone)]
pub struct LmConfig {
    /// The model to invoke.
    pub model: ModelId,
    /// Default sampling temperature, `0.0..=5.0`.
    pub temperature: f32,
    /// Default cap on generated tokens.
    pub max_tokens: Option<u32>,
    /// Chain-of-thought text appended after the user prompt.
    pub cot_prompt: Option<String>,
    /// Persona header prepended before the user prompt.
    pub persona: Option<String>,
}

impl LmConfig {
    /// Create a config with default sampling (temperature 1.0).
    pub fn new(model: ModelId) -> Self {
        Self {
            model,
            temperature: 1.0,
            max_tokens: None,
            cot_prompt: None,
            persona: None,
        }
    }

    /// Set the default temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the default max-tokens cap.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the chain-of-thought text.
    pub fn cot_prompt(mut self, cot: impl Into<String>) -> Self {
        self.cot_prompt = Some(cot.into());
        self
    }

    /// Set the persona.
    pub fn persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    /// Check the temperature bounds.
    pub fn validate(&self) -> Result<(), ProviderConfigError> {
        if !(0.0..=5.0).contains(&self.temperature) {
            return Err(ProviderConfigError::InvalidField {
                id: self.model.clone(),
                field: "temperature",
                reason: format!("must be within 0.0..=5.0, got {}", self.temperature),
            });
        }
        Ok(())
    }
}

/// A callable generation unit over one model configuration.
pub struct LmModule {
    config: LmConfig,
    service: Arc<ModelService>,
}

impl LmModule {
    /// Create a module; rejects out-of-bounds config.
    pub fn new(config: LmConfig, service: Arc<ModelService>) -> Result<Self, ProviderConfigError> {
        config.validate()?;
        Ok(Self { config, service })
    }

    /// This module's configuration.
    pub fn config(&self) -> &LmConfig {
        &self.config
    }

    /// Generate text for `prompt`.
    ///
    /// The assembled prompt — persona header, trimmed prompt, optional
    /// chain-of-thought block — is what reaches the service. `overrides`
    /// take precedence over the stored defaults.
    pub async fn generate(
        &self,
        prompt: &str,
        overrides: &CallParams,
    ) -> Result<String, ServiceError> {
        let assembled = self.assemble_prompt(prompt);
        let defaults = self.default_params();
        let params = overrides.merged_over(&defaults);
        let generation = self
            .service
            .invoke(self.config.model.as_str(), &assembled, &params)
            .await?;
        Ok(generation.data)
    }

    fn default_params(&self) -> CallParams {
        let params = CallParams::new().temperature(self.config.temperature);
        match self.config.max_tokens {
            Some(max_tokens) => params.max_tokens(max_tokens),
            None => params,
        }
    }

    /// Merge persona and chain-of-thought context around the user prompt.
    fn assemble_prompt(&self, prompt: &str) -> String {
        let mut segments: Vec<String> = Vec::new();
        if let Some(persona) = &self.config.persona {
            segments.push(format!("[Persona: {persona}]"));
        }
        segments.push(prompt.trim().to_owned());
        if let Some(cot) = &self.config.cot_prompt {
            segments.push(String::new());
            segments.push(format!("{COT_HEADER}\n{}", cot.trim()));
        }
        segments.join("\n").trim().to_owned()
    }
}

impl std::fmt::Debug for LmModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LmModule")
            .field("model", &self.config.model)
            .finish()
    }
}
