//! Console output formatter for analysis results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use concept_application::BackendStatus;
use concept_domain::{AnalysisResult, ConceptAnalysis};

/// Formats analysis results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete analysis result
    pub fn format(result: &AnalysisResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Concept Analysis Results"));
        output.push('\n');

        let models: Vec<&str> = result
            .analyses
            .iter()
            .map(|a| a.model_name.as_str())
            .collect();
        output.push_str(&format!(
            "{} {}\n",
            "Analyses:".cyan().bold(),
            if models.is_empty() {
                "none".to_string()
            } else {
                models.join(", ")
            }
        ));
        if result.fallback_used {
            output.push_str(&format!(
                "{}\n",
                "No backend produced usable output; items grouped by category.".yellow()
            ));
        }

        for analysis in &result.analyses {
            output.push_str(&Self::format_analysis(analysis));
        }

        if result.fallback_used && !result.analyses.is_empty() {
            output.push_str(&Self::section_header("Categories"));
            for (name, count) in result.category_counts() {
                output.push_str(&format!("  {:<30} {}\n", name, count));
            }
        }

        output.push_str(&Self::footer());

        output
    }

    fn format_analysis(analysis: &ConceptAnalysis) -> String {
        let mut output = String::new();
        let title = format!("── {} ──", analysis.model_name);

        if let Some(error) = &analysis.error {
            output.push_str(&format!("\n{}\nError: {}\n", title.red().bold(), error));
            if let Some(raw) = &analysis.raw_response {
                output.push_str(&format!(
                    "{}\n{}\n",
                    "Raw response:".dimmed(),
                    Self::indent(raw, "  | ")
                ));
            }
        } else {
            output.push_str(&format!("\n{}\n", title.yellow().bold()));
        }

        if !analysis.concepts.is_empty() {
            output.push_str(&format!("{}\n", "Concepts:".cyan().bold()));
            for entry in &analysis.concepts {
                output.push_str(&format!(
                    "  {}: {}\n",
                    entry.item_id.bold(),
                    entry.concepts.join(", ")
                ));
            }
        }

        if !analysis.relationships.is_empty() {
            output.push_str(&format!("{}\n", "Relationships:".cyan().bold()));
            for rel in &analysis.relationships {
                output.push_str(&format!(
                    "  {} <-> {} [{}, {:.2}]",
                    rel.item_id1, rel.item_id2, rel.kind, rel.strength
                ));
                if !rel.rationale.is_empty() {
                    output.push_str(&format!(" {}", rel.rationale.dimmed()));
                }
                output.push('\n');
            }
        }

        if !analysis.suggested_clusters.is_empty() {
            output.push_str(&format!("{}\n", "Clusters:".cyan().bold()));
            for cluster in &analysis.suggested_clusters {
                output.push_str(&format!(
                    "  {} ({}): {}\n",
                    cluster.name.green().bold(),
                    cluster.item_ids.join(", "),
                    cluster.description
                ));
                if !cluster.themes.is_empty() {
                    output.push_str(&format!("    themes: {}\n", cluster.themes.join(", ")));
                }
            }
        }

        output
    }

    /// Format as JSON
    pub fn format_json(result: &AnalysisResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// One line per analysis (concise output)
    pub fn format_summary(result: &AnalysisResult) -> String {
        let mut output = String::new();

        for analysis in &result.analyses {
            let line = match &analysis.error {
                Some(error) => format!("{} {}: {}", "x".red(), analysis.model_name, error),
                None => format!(
                    "{} {}: {} concept sets, {} relationships, {} clusters",
                    "v".green(),
                    analysis.model_name,
                    analysis.concepts.len(),
                    analysis.relationships.len(),
                    analysis.suggested_clusters.len()
                ),
            };
            output.push_str(&line);
            output.push('\n');
        }

        let errors = result.error_count();
        if errors > 0 {
            output.push_str(&format!(
                "{} of {} analyses reported errors\n",
                errors,
                result.analyses.len()
            ));
        }

        if result.fallback_used {
            output.push_str(&format!("{}\n", "fallback used".yellow()));
        }

        output
    }

    /// Format the result of a backend availability check
    pub fn format_backend_statuses(statuses: &[BackendStatus]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Backend Availability"));
        output.push('\n');

        if statuses.is_empty() {
            output.push_str("No backends configured.\n");
        }

        for status in statuses {
            match &status.models {
                Ok(models) => {
                    output.push_str(&format!(
                        "{} {} - {} model(s)\n",
                        "v".green(),
                        status.backend,
                        models.len()
                    ));
                    if status.serves_configured_model() == Some(false) {
                        output.push_str(&format!(
                            "    {} '{}' is not among the served models\n",
                            "warning:".yellow(),
                            status.backend.model_id
                        ));
                    }
                }
                Err(e) => {
                    output.push_str(&format!("{} {} - {}\n", "x".red(), status.backend, e));
                }
            }
        }

        output.push_str(&Self::footer());
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &AnalysisResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &AnalysisResult) -> String {
        Self::format_json(result)
    }

    fn format_summary(&self, result: &AnalysisResult) -> String {
        Self::format_summary(result)
    }
}
