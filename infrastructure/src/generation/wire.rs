//! Request and response bodies for the supported backend dialects.

use concept_domain::BackendDescriptor;
use serde::{Deserialize, Serialize};

pub const OLLAMA_GENERATE_PATH: &str = "/api/generate";
pub const OLLAMA_TAGS_PATH: &str = "/api/tags";
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const OPENAI_MODELS_PATH: &str = "/v1/models";

// ==================== Ollama ====================

#[derive(Debug, Serialize)]
pub struct OllamaGenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
pub struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

impl<'a> OllamaGenerateRequest<'a> {
    pub fn new(backend: &'a BackendDescriptor, prompt: &'a str) -> Self {
        let options = (backend.temperature.is_some() || backend.max_tokens.is_some()).then(|| {
            OllamaOptions {
                temperature: backend.temperature,
                num_predict: backend.max_tokens,
            }
        });
        Self {
            model: &backend.model_id,
            prompt,
            stream: false,
            options,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OllamaGenerateResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct OllamaTagsResponse {
    #[serde(default)]
    pub models: Vec<OllamaModelTag>,
}

#[derive(Debug, Deserialize)]
pub struct OllamaModelTag {
    pub name: String,
}

// ==================== OpenAI-compatible ====================

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn new(backend: &'a BackendDescriptor, prompt: &'a str) -> Self {
        Self {
            model: &backend.model_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            temperature: backend.temperature,
            max_tokens: backend.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any
    pub fn into_text(self) -> Option<String> {
        self.choices.into_iter().next()?.message.content
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenAiModelsResponse {
    #[serde(default)]
    pub data: Vec<OpenAiModel>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiModel {
    pub id: String,
}
