//! DeepSeek provider binding.
//!
//! The DeepSeek API is OpenAI-compatible; only the endpoint and auth key
//! differ, so this binding reuses the shared wire types.

use crate::http::HttpProvider;
use crate::wire::{ChatRequest, ChatResponse};
use anyhow::Result;
use async_trait::async_trait;
use mcore::{CallParams, Completion, ModelInfo, Provider};
use reqwest::Client;

/// Provider name used by discovery.
pub const PROVIDER_NAME: &str = "deepseek";

/// DeepSeek endpoint URLs.
pub mod endpoint {
    /// DeepSeek chat completions endpoint.
    pub const DEEPSEEK: &str = "https://api.deepseek.com/chat/completions";
}

/// DeepSeek chat completions binding.
#[derive(Clone)]
pub struct DeepSeek {
    info: ModelInfo,
    http: HttpProvider,
}

impl DeepSeek {
    /// Create a binding from a validated model config.
    pub fn new(info: ModelInfo, client: Client) -> Result<Self> {
        let key = info.resolved_api_key().unwrap_or_default();
        let endpoint = info.base_url().unwrap_or(endpoint::DEEPSEEK);
        let http = HttpProvider::bearer(client, key, endpoint)?;
        Ok(Self { info, http })
    }

    /// The endpoint this binding posts to.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }
}

#[async_trait]
impl Provider for DeepSeek {
    fn model_info(&self) -> &ModelInfo {
        &self.info
    }

    async fn complete(&self, prompt: &str, params: &CallParams) -> Result<Completion> {
        let request = ChatRequest::from_prompt(self.info.id.model(), prompt, params);
        let response: ChatResponse = self.http.post(&request).await?;
        Ok(response.into())
    }
}
