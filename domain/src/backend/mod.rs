//! Generation backend descriptors.
//!
//! A [`BackendDescriptor`] is the static configuration of one free-text
//! generation service. The process-wide list is built once at start-up and
//! shared read-only across requests.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Wire dialect spoken by a generation service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// `POST /api/generate` with `{model, prompt, stream}`
    #[default]
    Ollama,
    /// OpenAI-compatible `POST /v1/chat/completions` (LM Studio and friends)
    #[serde(alias = "lmstudio", alias = "openai-compatible")]
    OpenAi,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Ollama => "ollama",
            BackendKind::OpenAi => "openai",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(BackendKind::Ollama),
            "openai" | "lmstudio" | "openai-compatible" => Ok(BackendKind::OpenAi),
            other => Err(DomainError::InvalidBackend(format!(
                "unknown backend kind '{}'",
                other
            ))),
        }
    }
}

/// Static configuration for one generation service (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendDescriptor {
    /// Display label, also recorded as the analysis' `model_name`
    pub name: String,
    /// Base URL of the service
    pub endpoint: String,
    /// Model selector passed to the service
    pub model_id: String,
    #[serde(default)]
    pub kind: BackendKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl BackendDescriptor {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            model_id: model_id.into(),
            kind: BackendKind::default(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_kind(mut self, kind: BackendKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Endpoint without trailing slashes, ready for path joining.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    /// Full URL of a service path such as `/api/generate`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

impl std::fmt::Display for BackendDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} @ {})", self.name, self.model_id, self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_strips_trailing_slash() {
        let backend = BackendDescriptor::new("Ollama", "http://localhost:11434/", "llama3");
        assert_eq!(backend.url("/api/generate"), "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("ollama".parse::<BackendKind>().unwrap(), BackendKind::Ollama);
        assert_eq!("LMStudio".parse::<BackendKind>().unwrap(), BackendKind::OpenAi);
        assert!("gopher".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_kind_serde_aliases() {
        let kind: BackendKind = serde_json::from_str("\"lmstudio\"").unwrap();
        assert_eq!(kind, BackendKind::OpenAi);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"openai\"");
    }

    #[test]
    fn test_builder_defaults() {
        let backend = BackendDescriptor::new("LM Studio", "http://localhost:1234", "local-model")
            .with_kind(BackendKind::OpenAi)
            .with_max_tokens(1000);
        assert_eq!(backend.kind, BackendKind::OpenAi);
        assert_eq!(backend.temperature, None);
        assert_eq!(backend.max_tokens, Some(1000));
        assert_eq!(
            backend.to_string(),
            "LM Studio (local-model @ http://localhost:1234)"
        );
    }
}
