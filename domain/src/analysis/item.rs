//! Question/answer items submitted for analysis.

use crate::core::error::DomainError;
use crate::core::string::truncate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One question-answer unit submitted for analysis (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaItem {
    /// Opaque identifier, unique within a request
    pub id: String,
    pub question: String,
    /// Answer text; items without one are excluded from analysis
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub category: String,
}

impl QaItem {
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: Some(answer.into()),
            category: category.into(),
        }
    }

    /// Create an item that has no answer yet
    pub fn unanswered(
        id: impl Into<String>,
        question: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: None,
            category: category.into(),
        }
    }

    /// Returns `true` if the item carries a non-blank answer.
    pub fn has_content(&self) -> bool {
        self.answer
            .as_deref()
            .is_some_and(|answer| !answer.trim().is_empty())
    }

    /// Copy of this item with question and answer cut to the given limits.
    pub fn truncated(&self, limits: &AnalysisLimits) -> Self {
        Self {
            id: self.id.clone(),
            question: truncate(&self.question, limits.question_max_chars),
            answer: self
                .answer
                .as_deref()
                .map(|answer| truncate(answer, limits.answer_max_chars)),
            category: self.category.clone(),
        }
    }
}

/// Inbound analysis request.
///
/// Accepts both the `{"questions": [...]}` envelope and a bare array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisRequest {
    Envelope { questions: Vec<QaItem> },
    Items(Vec<QaItem>),
}

impl AnalysisRequest {
    pub fn into_items(self) -> Vec<QaItem> {
        match self {
            AnalysisRequest::Envelope { questions } => questions,
            AnalysisRequest::Items(items) => items,
        }
    }
}

/// Bounds applied while building the shared prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisLimits {
    pub question_max_chars: usize,
    pub answer_max_chars: usize,
    /// Items beyond this count are left out of the prompt but still grouped by the fallback
    pub max_prompt_items: usize,
}

impl AnalysisLimits {
    pub const DEFAULT_QUESTION_MAX_CHARS: usize = 200;
    pub const DEFAULT_ANSWER_MAX_CHARS: usize = 500;
    pub const DEFAULT_MAX_PROMPT_ITEMS: usize = 10;

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.question_max_chars == 0 || self.answer_max_chars == 0 {
            return Err(DomainError::InvalidLimits(
                "truncation lengths must be greater than zero".to_string(),
            ));
        }
        if self.max_prompt_items == 0 {
            return Err(DomainError::InvalidLimits(
                "max_prompt_items must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            question_max_chars: Self::DEFAULT_QUESTION_MAX_CHARS,
            answer_max_chars: Self::DEFAULT_ANSWER_MAX_CHARS,
            max_prompt_items: Self::DEFAULT_MAX_PROMPT_ITEMS,
        }
    }
}

/// Keep only items with answer content, in their original order.
pub fn items_with_content(items: &[QaItem]) -> Vec<QaItem> {
    items.iter().filter(|item| item.has_content()).cloned().collect()
}

/// Check that every item has a non-empty id and that ids are unique.
pub fn validate_item_ids(items: &[QaItem]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        if item.id.trim().is_empty() {
            return Err(DomainError::EmptyItemId { position });
        }
        if !seen.insert(item.id.as_str()) {
            return Err(DomainError::DuplicateItemId(item.id.clone()));
        }
    }
    Ok(())
}

/// Drop repeated ids, keeping the first occurrence.
pub fn dedup_by_id(items: &[QaItem]) -> Vec<QaItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(item.id.as_str()))
        .cloned()
        .collect()
}
