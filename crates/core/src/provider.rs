//! The provider capability.
//!
//! A [`Provider`] is one live, validated binding to a text-generation
//! backend. It owns its [`ModelInfo`] by value, so later changes to the
//! caller's copy never affect a constructed provider.

use crate::info::ModelInfo;
use crate::params::CallParams;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Token counts reported by a provider for one call.
///
/// Zero when the backend reports nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u64,
    /// Tokens in the completion.
    pub completion_tokens: u64,
}

impl TokenUsage {
    /// Create a usage report from prompt and completion counts.
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    /// Total tokens for the call.
    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// The result of one generation call.
///
/// Every provider returns this shape — there is no "maybe has a data
/// field" fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Generated text.
    pub text: String,
    /// Token usage as reported by the backend.
    pub usage: TokenUsage,
}

/// A live binding to a text-generation backend.
///
/// Implementations are constructed from a validated [`ModelInfo`];
/// construction is local and performs no network I/O. `complete` is the
/// only networked operation, and implementations own their transport
/// concerns (the caller does no retries).
#[async_trait]
pub trait Provider: Send + Sync {
    /// The configuration this provider was constructed with.
    fn model_info(&self) -> &ModelInfo;

    /// Generate text for `prompt` with the given call parameters.
    async fn complete(&self, prompt: &str, params: &CallParams) -> Result<Completion>;
}
