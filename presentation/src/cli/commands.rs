//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report with concepts, relationships and clusters per backend
    Full,
    /// One line per analysis
    Summary,
    /// The `{analyses, fallback_used}` JSON document
    Json,
}

/// CLI arguments for concept-quorum
#[derive(Parser, Debug)]
#[command(name = "concept-quorum")]
#[command(author, version, about = "Concept analysis of Q&A items across local LLM backends")]
#[command(long_about = r#"
Concept Quorum sends a set of question/answer items to every configured
generation backend (Ollama, LM Studio, ...) in parallel and collects the
concepts, relationships and clusters each backend proposes.

Backends that fail or answer with unusable output are reported with an error.
When no backend produces anything, the items are grouped by their category
instead and the result is flagged with fallback_used.

The request is JSON, either an array of items or {"questions": [...]}:
  [{"id": "q1", "question": "...", "answer": "...", "category": "goals"}]

Configuration files are loaded from (in priority order):
1. CONCEPT_QUORUM_* environment variables
2. --config <path>             Explicit config file
3. ./concept-quorum.toml       Project-level config
4. ~/.config/concept-quorum/config.toml   Global config

Example:
  concept-quorum answers.json
  cat answers.json | concept-quorum -o json
  concept-quorum -b ollama -o summary answers.json
  concept-quorum --check
"#)]
pub struct Cli {
    /// Path to the JSON request (`-` or omitted reads stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Backends to query by name or config key (can be specified multiple times)
    #[arg(short, long, value_name = "NAME")]
    pub backend: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Probe configured backends and exit
    #[arg(long)]
    pub check: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Input path, or `None` for stdin.
    pub fn input_path(&self) -> Option<&std::path::Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["concept-quorum"]);
        assert_eq!(cli.output, OutputFormat::Full);
        assert!(cli.input_path().is_none());
        assert!(cli.backend.is_empty());
        assert!(!cli.check);
    }

    #[test]
    fn test_repeated_backend_and_dash_input() {
        let cli = Cli::parse_from([
            "concept-quorum",
            "-b",
            "ollama",
            "--backend",
            "LM Studio",
            "-o",
            "json",
            "-vv",
            "-",
        ]);
        assert_eq!(cli.backend, vec!["ollama", "LM Studio"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(cli.input_path().is_none());
    }

    #[test]
    fn test_input_path() {
        let cli = Cli::parse_from(["concept-quorum", "answers.json"]);
        assert_eq!(
            cli.input_path(),
            Some(std::path::Path::new("answers.json"))
        );
    }
}
