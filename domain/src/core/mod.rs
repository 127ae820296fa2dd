//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`string::truncate`]: bounded text for prompt construction
//! - [`validation::ConfigIssue`]: configuration problems found at start-up

pub mod error;
pub mod string;
pub mod validation;
