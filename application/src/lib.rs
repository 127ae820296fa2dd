//! Application layer for concept-quorum
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    generation_gateway::{GenerationError, GenerationGateway},
    progress::{AnalysisProgress, NoProgress},
};
pub use use_cases::check_backends::{BackendStatus, CheckBackendsUseCase};
pub use use_cases::run_analysis::{RunAnalysisInput, RunAnalysisUseCase};
