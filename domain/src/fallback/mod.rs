//! Deterministic fallback clustering.
//!
//! When no backend produced usable output the items are grouped by their
//! category label instead. Grouping is stable: categories appear in the
//! order they are first seen and members keep their input order.
//!
//! Both the normal degradation path ([`synthesize`]) and the unexpected-error
//! path ([`synthesize_after_error`]) go through [`group_by_category`].

use crate::analysis::entities::{ConceptAnalysis, ConceptCluster, ItemConcepts};
use crate::analysis::item::{QaItem, dedup_by_id};

/// Model name recorded on synthesized analyses
pub const FALLBACK_MODEL_NAME: &str = "fallback";

/// Items sharing one category label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub items: Vec<&'a QaItem>,
}

impl CategoryGroup<'_> {
    fn to_cluster(&self) -> ConceptCluster {
        ConceptCluster {
            name: self.category.to_string(),
            description: format!("Questions in the '{}' category", self.category),
            item_ids: self.items.iter().map(|item| item.id.clone()).collect(),
            themes: vec![self.category.to_string()],
        }
    }
}

/// Group items by category in first-seen order.
pub fn group_by_category(items: &[QaItem]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => group.items.push(item),
            None => groups.push(CategoryGroup {
                category: &item.category,
                items: vec![item],
            }),
        }
    }
    groups
}

/// Build the category-based analysis for `items`.
///
/// One cluster per category, one concept entry per item (its category),
/// and no relationships.
pub fn synthesize(items: &[QaItem]) -> ConceptAnalysis {
    let clusters = group_by_category(items)
        .iter()
        .map(|group| group.to_cluster())
        .collect();

    let concepts = items
        .iter()
        .map(|item| ItemConcepts {
            item_id: item.id.clone(),
            concepts: vec![item.category.clone()],
        })
        .collect();

    ConceptAnalysis {
        model_name: FALLBACK_MODEL_NAME.to_string(),
        concepts,
        relationships: Vec::new(),
        suggested_clusters: clusters,
        raw_response: None,
        error: None,
    }
}

/// Fallback used when orchestration itself failed.
///
/// Repeated ids keep their first occurrence so each id lands in exactly
/// one cluster; the analysis carries the originating error text.
pub fn synthesize_after_error(items: &[QaItem], error: impl Into<String>) -> ConceptAnalysis {
    let mut analysis = synthesize(&dedup_by_id(items));
    analysis.error = Some(error.into());
    analysis
}
