//! Infrastructure layer for concept-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod generation;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileAnalysisConfig, FileBackendConfig, FileBackendsConfig, FileConfig,
};
pub use generation::HttpGenerationGateway;
