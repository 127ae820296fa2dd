//! Analysis result types.
//!
//! - [`StructuredPayload`] - the machine-readable shape a model is asked to produce
//! - [`ConceptAnalysis`] - one backend's analysis (or the synthesized fallback)
//! - [`AnalysisResult`] - the response envelope returned to the caller

use serde::{Deserialize, Serialize};

/// Concept labels extracted for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemConcepts {
    #[serde(rename = "question_id")]
    pub item_id: String,
    pub concepts: Vec<String>,
}

/// A semantic relationship between two items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "question1_id")]
    pub item_id1: String,
    #[serde(rename = "question2_id")]
    pub item_id2: String,
    /// Kind of relationship, e.g. "similar", "explains", "contrasts"
    #[serde(rename = "relationship")]
    pub kind: String,
    /// Strength in `[0, 1]`
    pub strength: f64,
    #[serde(rename = "reasoning", alias = "rationale", default)]
    pub rationale: String,
}

/// A group of related items suggested by a model or by the fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptCluster {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "question_ids")]
    pub item_ids: Vec<String>,
    #[serde(default)]
    pub themes: Vec<String>,
}

/// The structured document a generation backend is asked to return.
///
/// All collections are optional in the document and default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredPayload {
    #[serde(default)]
    pub concepts: Vec<ItemConcepts>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub suggested_clusters: Vec<ConceptCluster>,
}

impl StructuredPayload {
    /// Index of the first relationship whose strength is outside `[0, 1]`.
    pub fn first_invalid_strength(&self) -> Option<usize> {
        self.relationships
            .iter()
            .position(|r| !r.strength.is_finite() || !(0.0..=1.0).contains(&r.strength))
    }
}

/// Structured analysis produced by, or on behalf of, one backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptAnalysis {
    pub model_name: String,
    #[serde(default)]
    pub concepts: Vec<ItemConcepts>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub suggested_clusters: Vec<ConceptCluster>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConceptAnalysis {
    /// Creates an analysis from a successfully extracted payload.
    pub fn from_payload(
        model_name: impl Into<String>,
        payload: StructuredPayload,
        raw_response: Option<String>,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            concepts: payload.concepts,
            relationships: payload.relationships,
            suggested_clusters: payload.suggested_clusters,
            raw_response,
            error: None,
        }
    }

    /// Creates a failed analysis with empty collections.
    pub fn failure(
        model_name: impl Into<String>,
        error: impl Into<String>,
        raw_response: Option<String>,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            concepts: Vec::new(),
            relationships: Vec::new(),
            suggested_clusters: Vec::new(),
            raw_response,
            error: Some(error.into()),
        }
    }

    /// Returns `true` if neither concepts nor clusters were produced.
    ///
    /// Relationships and `error` are not considered.
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty() && self.suggested_clusters.is_empty()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Response envelope for one analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analyses: Vec<ConceptAnalysis>,
    pub fallback_used: bool,
}

impl AnalysisResult {
    /// Result for a request with nothing to analyze.
    pub fn empty() -> Self {
        Self {
            analyses: Vec::new(),
            fallback_used: true,
        }
    }

    /// Result consisting of a single synthesized fallback analysis.
    pub fn fallback(analysis: ConceptAnalysis) -> Self {
        Self {
            analyses: vec![analysis],
            fallback_used: true,
        }
    }

    /// Result built from real backend analyses.
    pub fn from_backends(analyses: Vec<ConceptAnalysis>) -> Self {
        Self {
            analyses,
            fallback_used: false,
        }
    }

    /// Number of analyses that reported an error.
    pub fn error_count(&self) -> usize {
        self.analyses.iter().filter(|a| a.is_error()).count()
    }

    /// Item counts per cluster name, in first-seen order across all analyses.
    ///
    /// For a fallback result the cluster names are the input categories.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for cluster in self.analyses.iter().flat_map(|a| &a.suggested_clusters) {
            match counts.iter_mut().find(|(name, _)| *name == cluster.name) {
                Some((_, count)) => *count += cluster.item_ids.len(),
                None => counts.push((cluster.name.clone(), cluster.item_ids.len())),
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cluster(name: &str, ids: &[&str]) -> ConceptCluster {
        ConceptCluster {
            name: name.to_string(),
            description: String::new(),
            item_ids: ids.iter().map(|s| s.to_string()).collect(),
            themes: Vec::new(),
        }
    }

    #[test]
    fn test_failure_has_empty_collections() {
        let analysis = ConceptAnalysis::failure("Ollama", "Timeout", None);
        assert!(analysis.is_empty());
        assert!(analysis.is_error());
        assert!(analysis.relationships.is_empty());
    }

    #[test]
    fn test_is_empty_ignores_relationships() {
        let payload = StructuredPayload {
            relationships: vec![Relationship {
                item_id1: "1".into(),
                item_id2: "2".into(),
                kind: "similar".into(),
                strength: 0.5,
                rationale: String::new(),
            }],
            ..StructuredPayload::default()
        };
        let analysis = ConceptAnalysis::from_payload("m", payload, None);
        assert!(analysis.is_empty());
    }

    #[test]
    fn test_wire_field_names() {
        let analysis = ConceptAnalysis::from_payload(
            "Ollama",
            StructuredPayload {
                concepts: vec![ItemConcepts {
                    item_id: "1".into(),
                    concepts: vec!["focus".into()],
                }],
                relationships: vec![Relationship {
                    item_id1: "1".into(),
                    item_id2: "2".into(),
                    kind: "explains".into(),
                    strength: 0.8,
                    rationale: "shared topic".into(),
                }],
                suggested_clusters: vec![cluster("a", &["1"])],
            },
            None,
        );
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["model_name"], "Ollama");
        assert_eq!(value["concepts"][0]["question_id"], "1");
        assert_eq!(value["relationships"][0]["question1_id"], "1");
        assert_eq!(value["relationships"][0]["relationship"], "explains");
        assert_eq!(value["relationships"][0]["reasoning"], "shared topic");
        assert_eq!(value["suggested_clusters"][0]["question_ids"], json!(["1"]));
        assert!(value.get("error").is_none());
        assert!(value.get("raw_response").is_none());
    }

    #[test]
    fn test_result_envelope_field_names() {
        let value = serde_json::to_value(AnalysisResult::empty()).unwrap();
        assert_eq!(value, json!({"analyses": [], "fallback_used": true}));
    }

    #[test]
    fn test_rationale_alias_accepted() {
        let rel: Relationship = serde_json::from_value(json!({
            "question1_id": "1",
            "question2_id": "2",
            "relationship": "similar",
            "strength": 0.3,
            "rationale": "both about time"
        }))
        .unwrap();
        assert_eq!(rel.rationale, "both about time");
    }

    #[test]
    fn test_first_invalid_strength() {
        let mut payload = StructuredPayload::default();
        assert_eq!(payload.first_invalid_strength(), None);
        for strength in [0.0, 1.0, 1.5] {
            payload.relationships.push(Relationship {
                item_id1: "1".into(),
                item_id2: "2".into(),
                kind: "similar".into(),
                strength,
                rationale: String::new(),
            });
        }
        assert_eq!(payload.first_invalid_strength(), Some(2));
    }

    #[test]
    fn test_category_counts_first_seen_order() {
        let mut a = ConceptAnalysis::failure("m", "x", None);
        a.error = None;
        a.suggested_clusters = vec![cluster("work", &["3"]), cluster("life", &["1", "2"])];
        let result = AnalysisResult::from_backends(vec![a]);
        assert_eq!(
            result.category_counts(),
            vec![("work".to_string(), 1), ("life".to_string(), 2)]
        );
        assert_eq!(result.error_count(), 0);
    }
}
