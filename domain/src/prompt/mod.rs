//! Prompt domain
//!
//! Builds the single shared prompt sent to every generation backend.

mod template;

pub use template::PromptTemplate;
