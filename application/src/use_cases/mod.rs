//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod check_backends;
pub mod run_analysis;
