//! OpenAI-compatible chat completions wire types.
//!
//! Shared by the OpenAI and DeepSeek bindings. Optional fields use
//! `skip_serializing_if` so provider-specific extras are simply absent
//! when unused; `extra` is flattened into the body verbatim.

use compact_str::CompactString;
use mcore::{CallParams, Completion, TokenUsage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Chat completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The model name (the model segment of the identifier).
    pub model: String,
    /// The messages to send.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Provider-specific fields, serialized at the top level.
    #[serde(flatten)]
    pub extra: BTreeMap<CompactString, Value>,
}

impl ChatRequest {
    /// Build a single-turn request from a prompt and call parameters.
    pub fn from_prompt(model: &str, prompt: &str, params: &CallParams) -> Self {
        Self {
            model: model.to_owned(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt.to_owned(),
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            extra: params.extra.clone(),
        }
    }
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The author role.
    pub role: String,
    /// The message text.
    pub content: String,
}

/// Chat completions response body, trimmed to the consumed fields.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion choices; the first is used.
    pub choices: Vec<ChatChoice>,
    /// Token usage, when the backend reports it.
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ChatChoiceMessage,
}

/// The message of a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    /// The generated text.
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChatUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u64,
    /// Tokens in the completion.
    pub completion_tokens: u64,
}

impl From<ChatResponse> for Completion {
    fn from(response: ChatResponse) -> Self {
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        let usage = response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();
        Completion { text, usage }
    }
}
