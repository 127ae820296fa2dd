//! HTTP adapter for generation backends.

use super::wire::{
    CHAT_COMPLETIONS_PATH, ChatCompletionRequest, ChatCompletionResponse, OLLAMA_GENERATE_PATH,
    OLLAMA_TAGS_PATH, OPENAI_MODELS_PATH, OllamaGenerateRequest, OllamaGenerateResponse,
    OllamaTagsResponse, OpenAiModelsResponse,
};
use async_trait::async_trait;
use concept_application::ports::generation_gateway::{GenerationError, GenerationGateway};
use concept_domain::{BackendDescriptor, BackendKind};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

/// [`GenerationGateway`] speaking HTTP/JSON to Ollama and OpenAI-compatible servers.
///
/// One client is shared by every backend; each request is bounded by the
/// client timeout, so a slow backend only ever costs its own timeout.
pub struct HttpGenerationGateway {
    client: reqwest::Client,
    probe_timeout: Duration,
}

impl HttpGenerationGateway {
    /// Default bound on a single generation request
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Bound on availability probes
    pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("concept-quorum/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            probe_timeout: Self::PROBE_TIMEOUT.min(timeout),
        })
    }

    /// Send a request and return the body of a 2xx response
    async fn send(request: reqwest::RequestBuilder) -> Result<String, GenerationError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(GenerationError::Http {
                status: status.as_u16(),
                body,
            });
        }

        trace!("Response body: {}", body);
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        backend: &BackendDescriptor,
        path: &str,
    ) -> Result<T, GenerationError> {
        let request = self
            .client
            .get(backend.url(path))
            .timeout(self.probe_timeout);
        let body = Self::send(request).await?;
        decode(&body)
    }
}

#[async_trait]
impl GenerationGateway for HttpGenerationGateway {
    async fn generate(
        &self,
        backend: &BackendDescriptor,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        debug!(
            "POST {} ({} bytes of prompt) to {}",
            backend.kind,
            prompt.len(),
            backend
        );

        match backend.kind {
            BackendKind::Ollama => {
                let request = self
                    .client
                    .post(backend.url(OLLAMA_GENERATE_PATH))
                    .json(&OllamaGenerateRequest::new(backend, prompt));
                let body = Self::send(request).await?;
                let decoded: OllamaGenerateResponse = decode(&body)?;
                Ok(decoded.response)
            }
            BackendKind::OpenAi => {
                let request = self
                    .client
                    .post(backend.url(CHAT_COMPLETIONS_PATH))
                    .json(&ChatCompletionRequest::new(backend, prompt));
                let body = Self::send(request).await?;
                let decoded: ChatCompletionResponse = decode(&body)?;
                decoded.into_text().ok_or_else(|| {
                    GenerationError::InvalidResponse("no message content in choices".to_string())
                })
            }
        }
    }

    async fn list_models(
        &self,
        backend: &BackendDescriptor,
    ) -> Result<Vec<String>, GenerationError> {
        match backend.kind {
            BackendKind::Ollama => {
                let tags: OllamaTagsResponse = self.get_json(backend, OLLAMA_TAGS_PATH).await?;
                Ok(tags.models.into_iter().map(|m| m.name).collect())
            }
            BackendKind::OpenAi => {
                let models: OpenAiModelsResponse =
                    self.get_json(backend, OPENAI_MODELS_PATH).await?;
                Ok(models.data.into_iter().map(|m| m.id).collect())
            }
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else if e.is_connect() {
        GenerationError::Connection(e.to_string())
    } else if e.is_body() || e.is_decode() {
        GenerationError::InvalidResponse(e.to_string())
    } else {
        // Request-level failures such as a reset connection or a bad URL
        GenerationError::Connection(e.to_string())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, GenerationError> {
    serde_json::from_str(body).map_err(|e| GenerationError::InvalidResponse(e.to_string()))
}
