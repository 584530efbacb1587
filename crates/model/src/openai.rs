//! OpenAI provider binding.

use crate::http::HttpProvider;
use crate::wire::{ChatRequest, ChatResponse};
use anyhow::Result;
use async_trait::async_trait;
use mcore::{CallParams, Completion, ModelInfo, Provider};
use reqwest::Client;

/// Provider name used by discovery.
pub const PROVIDER_NAME: &str = "openai";

/// OpenAI endpoint URLs.
pub mod endpoint {
    /// OpenAI chat completions endpoint.
    pub const OPENAI: &str = "https://api.openai.com/v1/chat/completions";
}

/// OpenAI chat completions binding.
#[derive(Clone)]
pub struct OpenAi {
    info: ModelInfo,
    http: HttpProvider,
}

impl OpenAi {
    /// Create a binding from a validated model config.
    ///
    /// The endpoint defaults to the OpenAI API; `provider.base_url`
    /// overrides it for compatible backends.
    pub fn new(info: ModelInfo, client: Client) -> Result<Self> {
        let key = info.resolved_api_key().unwrap_or_default();
        let endpoint = info.base_url().unwrap_or(endpoint::OPENAI);
        let http = HttpProvider::bearer(client, key, endpoint)?;
        Ok(Self { info, http })
    }

    /// The endpoint this binding posts to.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }
}

#[async_trait]
impl Provider for OpenAi {
    fn model_info(&self) -> &ModelInfo {
        &self.info
    }

    async fn complete(&self, prompt: &str, params: &CallParams) -> Result<Completion> {
        let request = ChatRequest::from_prompt(self.info.id.model(), prompt, params);
        let response: ChatResponse = self.http.post(&request).await?;
        Ok(response.into())
    }
}
