//! Echo provider for testing.
//!
//! Implements [`Provider`] without any network I/O: returns the prompt
//! back, prefixed, with a fixed usage report, and records every call so
//! tests can assert on the parameters a provider actually received.

use crate::info::ModelInfo;
use crate::params::CallParams;
use crate::provider::{Completion, Provider, TokenUsage};
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;

/// A test provider that echoes prompts and records calls.
pub struct EchoProvider {
    info: ModelInfo,
    usage: TokenUsage,
    calls: Mutex<Vec<(String, CallParams)>>,
}

impl EchoProvider {
    /// Create an echo provider reporting zero usage.
    pub fn new(info: ModelInfo) -> Self {
        Self::with_usage(info, TokenUsage::default())
    }

    /// Create an echo provider reporting the given usage on every call.
    pub fn with_usage(info: ModelInfo, usage: TokenUsage) -> Self {
        Self {
            info,
            usage,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(prompt, params)` pair this provider has received.
    pub fn calls(&self) -> Vec<(String, CallParams)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Provider for EchoProvider {
    fn model_info(&self) -> &ModelInfo {
        &self.info
    }

    async fn complete(&self, prompt: &str, params: &CallParams) -> Result<Completion> {
        self.calls.lock().push((prompt.to_owned(), params.clone()));
        Ok(Completion {
            text: format!("echo: {prompt}"),
            usage: self.usage,
        })
    }
}
