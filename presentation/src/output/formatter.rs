//! Output formatter trait

use crate::cli::commands::OutputFormat;
use concept_domain::AnalysisResult;

/// Trait for formatting analysis results
pub trait OutputFormatter {
    /// Format the complete result
    fn format(&self, result: &AnalysisResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &AnalysisResult) -> String;

    /// One line per analysis
    fn format_summary(&self, result: &AnalysisResult) -> String;

    /// Dispatch on the selected output format
    fn render(&self, result: &AnalysisResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(result),
            OutputFormat::Summary => self.format_summary(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
