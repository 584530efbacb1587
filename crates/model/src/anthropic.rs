//! Anthropic provider binding.
//!
//! Uses the Messages API, which differs from the OpenAI-compatible shape:
//! `x-api-key` auth, a version header, content blocks in the response,
//! and a mandatory `max_tokens`.

use crate::http::HttpProvider;
use anyhow::Result;
use async_trait::async_trait;
use compact_str::CompactString;
use mcore::{CallParams, Completion, ModelInfo, Provider, TokenUsage};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Provider name used by discovery.
pub const PROVIDER_NAME: &str = "anthropic";

/// Messages API version header value.
const API_VERSION: &str = "2023-06-01";

/// The Messages API requires `max_tokens`; this is sent when no cap is
/// configured or passed per call.
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Anthropic endpoint URLs.
pub mod endpoint {
    /// Anthropic Messages endpoint.
    pub const ANTHROPIC: &str = "https://api.anthropic.com/v1/messages";
}

/// Anthropic Messages binding.
#[derive(Clone)]
pub struct Anthropic {
    info: ModelInfo,
    http: HttpProvider,
}

impl Anthropic {
    /// Create a binding from a validated model config.
    pub fn new(info: ModelInfo, client: Client) -> Result<Self> {
        let key = info.resolved_api_key().unwrap_or_default();
        let endpoint = info.base_url().unwrap_or(endpoint::ANTHROPIC);
        let http = HttpProvider::custom_header(client, "x-api-key", key, endpoint)?
            .with_header("anthropic-version", API_VERSION)?;
        Ok(Self { info, http })
    }

    /// The endpoint this binding posts to.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }
}

#[async_trait]
impl Provider for Anthropic {
    fn model_info(&self) -> &ModelInfo {
        &self.info
    }

    async fn complete(&self, prompt: &str, params: &CallParams) -> Result<Completion> {
        let request = MessagesRequest::from_prompt(self.info.id.model(), prompt, params);
        let response: MessagesResponse = self.http.post(&request).await?;
        Ok(response.into())
    }
}

/// Messages API request body.
#[derive(Debug, Clone, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<MessagesTurn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(flatten)]
    extra: BTreeMap<CompactString, Value>,
}

impl MessagesRequest {
    fn from_prompt(model: &str, prompt: &str, params: &CallParams) -> Self {
        Self {
            model: model.to_owned(),
            max_tokens: params.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages: vec![MessagesTurn {
                role: "user".into(),
                content: prompt.to_owned(),
            }],
            temperature: params.temperature,
            extra: params.extra.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct MessagesTurn {
    role: String,
    content: String,
}

/// Messages API response body, trimmed to the consumed fields.
#[derive(Debug, Clone, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<MessagesUsage>,
}

#[derive(Debug, Clone, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct MessagesUsage {
    input_tokens: u64,
    output_tokens: u64,
}

impl From<MessagesResponse> for Completion {
    fn from(response: MessagesResponse) -> Self {
        let text = response
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");
        let usage = response
            .usage
            .map(|u| TokenUsage::new(u.input_tokens, u.output_tokens))
            .unwrap_or_default();
        Completion { text, usage }
    }
}
