//! Progress reporting for backend dispatch

use colored::Colorize;
use concept_application::ports::progress::{AnalysisProgress, NoProgress};
use concept_domain::BackendDescriptor;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress on stderr with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn dispatch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        if let Ok(mut guard) = self.bar.lock() {
            f(&mut guard);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisProgress for ProgressReporter {
    fn on_dispatch_start(&self, total_backends: usize) {
        let pb = ProgressBar::new(total_backends as u64);
        pb.set_style(Self::dispatch_style());
        pb.set_prefix("Querying backends");
        pb.set_message("Starting...");
        pb.enable_steady_tick(std::time::Duration::from_millis(120));

        self.with_bar(|bar| *bar = Some(pb));
    }

    fn on_backend_complete(&self, backend: &BackendDescriptor, success: bool) {
        self.with_bar(|bar| {
            if let Some(pb) = bar.as_ref() {
                let status = if success {
                    format!("{} {}", "v".green(), backend.name)
                } else {
                    format!("{} {}", "x".red(), backend.name)
                };
                pb.set_message(status);
                pb.inc(1);
            }
        });
    }

    fn on_analysis_complete(&self, fallback_used: bool) {
        self.with_bar(|bar| {
            if let Some(pb) = bar.take() {
                let message = if fallback_used {
                    "done (category fallback)".yellow().to_string()
                } else {
                    "done".green().to_string()
                };
                pb.finish_with_message(message);
            }
        });
    }
}

/// Simple line-based progress for logs and pipes (no fancy UI)
pub struct SimpleProgress;

impl SimpleProgress {
    fn dispatch_line(total_backends: usize) -> String {
        format!(
            "{} {} ({} backends)",
            "->".cyan(),
            "Querying backends".bold(),
            total_backends
        )
    }

    fn backend_line(backend: &BackendDescriptor, success: bool) -> String {
        if success {
            format!("  {} {}", "v".green(), backend.name)
        } else {
            format!("  {} {} (failed)", "x".red(), backend.name)
        }
    }
}

impl AnalysisProgress for SimpleProgress {
    fn on_dispatch_start(&self, total_backends: usize) {
        eprintln!("{}", Self::dispatch_line(total_backends));
    }

    fn on_backend_complete(&self, backend: &BackendDescriptor, success: bool) {
        eprintln!("{}", Self::backend_line(backend, success));
    }

    fn on_analysis_complete(&self, fallback_used: bool) {
        if fallback_used {
            eprintln!("  {} category fallback used", "!".yellow());
        }
    }
}

/// How progress is shown during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Nothing (`--quiet`)
    Quiet,
    /// indicatif bar on an interactive terminal
    Bar,
    /// Plain lines when stderr is redirected
    Lines,
}

impl ProgressMode {
    pub fn select(quiet: bool, stderr_is_terminal: bool) -> Self {
        match (quiet, stderr_is_terminal) {
            (true, _) => ProgressMode::Quiet,
            (false, true) => ProgressMode::Bar,
            (false, false) => ProgressMode::Lines,
        }
    }

    /// Select from `--quiet` and the actual stderr.
    pub fn detect(quiet: bool) -> Self {
        use std::io::IsTerminal;
        Self::select(quiet, std::io::stderr().is_terminal())
    }

    pub fn reporter(self) -> Box<dyn AnalysisProgress> {
        match self {
            ProgressMode::Quiet => Box::new(NoProgress),
            ProgressMode::Bar => Box::new(ProgressReporter::new()),
            ProgressMode::Lines => Box::new(SimpleProgress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_lifecycle() {
        let reporter = ProgressReporter::new();
        let backend = BackendDescriptor::new("Ollama", "http://localhost:11434", "m");

        reporter.on_dispatch_start(2);
        reporter.on_backend_complete(&backend, true);
        reporter.on_backend_complete(&backend, false);
        {
            let guard = reporter.bar.lock().unwrap();
            assert_eq!(guard.as_ref().map(|pb| pb.position()), Some(2));
        }

        reporter.on_analysis_complete(false);
        assert!(reporter.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(ProgressMode::select(true, true), ProgressMode::Quiet);
        assert_eq!(ProgressMode::select(true, false), ProgressMode::Quiet);
        assert_eq!(ProgressMode::select(false, true), ProgressMode::Bar);
        assert_eq!(ProgressMode::select(false, false), ProgressMode::Lines);
    }

    #[test]
    fn test_simple_progress_lines() {
        colored::control::set_override(false);
        let backend = BackendDescriptor::new("LM Studio", "http://localhost:1234", "m");

        assert_eq!(
            SimpleProgress::dispatch_line(2),
            "-> Querying backends (2 backends)"
        );
        assert_eq!(SimpleProgress::backend_line(&backend, true), "  v LM Studio");
        assert_eq!(
            SimpleProgress::backend_line(&backend, false),
            "  x LM Studio (failed)"
        );

        let reporter = ProgressMode::Lines.reporter();
        reporter.on_dispatch_start(1);
        reporter.on_backend_complete(&backend, false);
        reporter.on_analysis_complete(true);
    }

    #[test]
    fn test_completion_without_start_is_ignored() {
        let reporter = ProgressReporter::default();
        let backend = BackendDescriptor::new("Ollama", "http://localhost:11434", "m");
        reporter.on_backend_complete(&backend, true);
        reporter.on_analysis_complete(true);
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
