//! Generation backends over HTTP
//!
//! Implements the [`GenerationGateway`](concept_application::GenerationGateway)
//! port for Ollama and OpenAI-compatible servers such as LM Studio.

mod http_gateway;
pub mod wire;

pub use http_gateway::HttpGenerationGateway;
