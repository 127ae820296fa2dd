//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These never reach the caller of an analysis: the orchestrator converts
/// them into a synthesized fallback analysis carrying the error text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Item at position {position} has an empty id")]
    EmptyItemId { position: usize },

    #[error("Duplicate item id: {0}")]
    DuplicateItemId(String),

    #[error("Invalid analysis limits: {0}")]
    InvalidLimits(String),

    #[error("Invalid backend: {0}")]
    InvalidBackend(String),
}

impl DomainError {
    /// Check if this error was caused by the submitted items themselves
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyItemId { .. } | DomainError::DuplicateItemId(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_display() {
        let error = DomainError::DuplicateItemId("q-1".to_string());
        assert_eq!(error.to_string(), "Duplicate item id: q-1");
    }

    #[test]
    fn test_is_input_error() {
        assert!(DomainError::EmptyItemId { position: 0 }.is_input_error());
        assert!(DomainError::DuplicateItemId("a".into()).is_input_error());
        assert!(!DomainError::InvalidLimits("zero".into()).is_input_error());
        assert!(!DomainError::InvalidBackend("x".into()).is_input_error());
    }
}
