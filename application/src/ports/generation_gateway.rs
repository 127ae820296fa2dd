//! Generation Gateway port
//!
//! Defines the interface for communicating with free-text generation services.

use async_trait::async_trait;
use concept_domain::BackendDescriptor;
use thiserror::Error;

/// Errors that can occur while talking to a generation backend
///
/// None of these are retried; each becomes the `error` of the backend's
/// analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// Check if the service could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, GenerationError::Connection(_) | GenerationError::Timeout)
    }
}

/// Gateway for generation services
///
/// This port defines how the application layer talks to generation backends.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Submit a prompt and wait for the complete (non-streamed) response text
    async fn generate(
        &self,
        backend: &BackendDescriptor,
        prompt: &str,
    ) -> Result<String, GenerationError>;

    /// List the models a backend serves; doubles as an availability probe
    async fn list_models(&self, backend: &BackendDescriptor)
    -> Result<Vec<String>, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = GenerationError::Http {
            status: 500,
            body: "model not loaded".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 500: model not loaded");
        assert_eq!(GenerationError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_is_unreachable() {
        assert!(GenerationError::Timeout.is_unreachable());
        assert!(GenerationError::Connection("refused".into()).is_unreachable());
        assert!(!GenerationError::InvalidResponse("{}".into()).is_unreachable());
    }
}
