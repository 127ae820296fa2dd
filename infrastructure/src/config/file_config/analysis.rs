//! Analysis configuration from TOML (`[analysis]` section)

use concept_domain::{AnalysisLimits, ConfigIssue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw analysis configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnalysisConfig {
    /// Per-backend request timeout in seconds
    pub timeout_secs: u64,
    pub question_max_chars: usize,
    pub answer_max_chars: usize,
    pub max_prompt_items: usize,
}

impl Default for FileAnalysisConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            question_max_chars: AnalysisLimits::DEFAULT_QUESTION_MAX_CHARS,
            answer_max_chars: AnalysisLimits::DEFAULT_ANSWER_MAX_CHARS,
            max_prompt_items: AnalysisLimits::DEFAULT_MAX_PROMPT_ITEMS,
        }
    }
}

impl FileAnalysisConfig {
    pub fn to_limits(&self) -> AnalysisLimits {
        AnalysisLimits {
            question_max_chars: self.question_max_chars,
            answer_max_chars: self.answer_max_chars,
            max_prompt_items: self.max_prompt_items,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                "analysis.timeout_secs must be greater than zero",
            ));
        }
        if let Err(e) = self.to_limits().validate() {
            issues.push(ConfigIssue::error(format!("analysis: {}", e)));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_keeps_defaults() {
        let toml_str = r#"
[analysis]
timeout_secs = 15
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analysis.timeout(), Duration::from_secs(15));
        assert_eq!(config.analysis.to_limits(), AnalysisLimits::default());
    }

    #[test]
    fn test_zero_values_are_errors() {
        let config = FileAnalysisConfig {
            timeout_secs: 0,
            max_prompt_items: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(ConfigIssue::is_error));
    }
}
