//! Domain layer for concept-quorum
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Concept analysis
//!
//! A set of question/answer items is sent to several independent text
//! generation backends. Each backend answers in free text, from which a
//! structured analysis (concepts, relationships, suggested clusters) is
//! extracted:
//!
//! - [`extraction`]: layered, strict parsing of raw model output
//! - [`fallback`]: deterministic category clustering when no model helps
//! - [`prompt`]: the single shared prompt sent to every backend

pub mod analysis;
pub mod backend;
pub mod core;
pub mod extraction;
pub mod fallback;
pub mod prompt;

// Re-export commonly used types
pub use analysis::{
    entities::{
        AnalysisResult, ConceptAnalysis, ConceptCluster, ItemConcepts, Relationship,
        StructuredPayload,
    },
    item::{AnalysisLimits, AnalysisRequest, QaItem},
};
pub use backend::{BackendDescriptor, BackendKind};
pub use core::{
    error::DomainError,
    validation::{ConfigIssue, Severity},
};
pub use extraction::{
    Extraction, ExtractionFailure, ParseAttempt, analysis_from_response, extract,
};
pub use fallback::{FALLBACK_MODEL_NAME, group_by_category, synthesize, synthesize_after_error};
pub use prompt::PromptTemplate;
