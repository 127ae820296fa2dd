//! Prompt template for concept analysis

use crate::analysis::item::{AnalysisLimits, QaItem};

/// Templates for the concept analysis prompt
pub struct PromptTemplate;

impl PromptTemplate {
    /// JSON skeleton the models are asked to fill in
    pub fn response_format() -> &'static str {
        r#"{
  "concepts": [
    {"question_id": "id", "concepts": ["concept1", "concept2"]}
  ],
  "relationships": [
    {"question1_id": "id1", "question2_id": "id2", "relationship": "similar/explains/contrasts", "strength": 0.8, "reasoning": "why they are related"}
  ],
  "suggested_clusters": [
    {"name": "cluster_name", "description": "what it represents", "question_ids": ["id1", "id2"], "themes": ["theme1"]}
  ]
}"#
    }

    /// Build the shared analysis prompt.
    ///
    /// `items` must already be filtered to items with content. Question and
    /// answer text are truncated, and only the first `max_prompt_items` items
    /// are embedded.
    pub fn concept_analysis(items: &[QaItem], limits: &AnalysisLimits) -> String {
        let mut prompt = String::from(
            "Analyze these questions and answers to identify key concepts and relationships:\n",
        );

        for (index, item) in items.iter().take(limits.max_prompt_items).enumerate() {
            let item = item.truncated(limits);
            let n = index + 1;
            prompt.push_str(&format!(
                "\nQ{} (id: {}, category: {}): {}\nA{}: {}\n",
                n,
                item.id,
                item.category,
                item.question,
                n,
                item.answer.as_deref().unwrap_or_default()
            ));
        }

        prompt.push_str(
            r#"
Please provide:
1. Key concepts extracted from each Q&A
2. Semantic relationships between questions (strength between 0 and 1)
3. Suggested concept clusters that group related questions

Use the ids given above for question_id, question1_id, question2_id and question_ids.

Format your response as JSON with this structure:
"#,
        );
        prompt.push_str(Self::response_format());
        prompt.push_str("\n\nRespond with the JSON document only.");

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<QaItem> {
        (1..=n)
            .map(|i| {
                QaItem::new(
                    format!("q{}", i),
                    format!("Question {}?", i),
                    format!("Answer {}", i),
                    "life",
                )
            })
            .collect()
    }

    #[test]
    fn test_prompt_embeds_ids_and_answers() {
        let prompt = PromptTemplate::concept_analysis(&items(2), &AnalysisLimits::default());
        assert!(prompt.contains("Q1 (id: q1, category: life): Question 1?"));
        assert!(prompt.contains("A2: Answer 2"));
        assert!(prompt.contains("\"suggested_clusters\""));
    }

    #[test]
    fn test_prompt_respects_max_items() {
        let limits = AnalysisLimits {
            max_prompt_items: 3,
            ..AnalysisLimits::default()
        };
        let prompt = PromptTemplate::concept_analysis(&items(5), &limits);
        assert!(prompt.contains("id: q3"));
        assert!(!prompt.contains("id: q4"));
        assert!(!prompt.contains("id: q5"));
    }

    #[test]
    fn test_prompt_truncates_text() {
        let limits = AnalysisLimits {
            question_max_chars: 10,
            answer_max_chars: 10,
            max_prompt_items: 10,
        };
        let item = QaItem::new("1", "x".repeat(50), "y".repeat(50), "work");
        let prompt = PromptTemplate::concept_analysis(&[item], &limits);
        assert!(prompt.contains(&format!("{}...", "x".repeat(7))));
        assert!(prompt.contains(&format!("A1: {}...", "y".repeat(7))));
        assert!(!prompt.contains(&"x".repeat(8)));
    }
}
