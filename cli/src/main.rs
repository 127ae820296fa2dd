//! CLI entrypoint for Concept Quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use concept_application::{CheckBackendsUseCase, RunAnalysisInput, RunAnalysisUseCase};
use concept_domain::BackendDescriptor;
use concept_infrastructure::{ConfigLoader, FileConfig, HttpGenerationGateway};
use concept_presentation::{Cli, ConsoleFormatter, OutputFormatter, ProgressMode, read_request};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG applies when no -v is given
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    info!("Starting Concept Quorum");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue.message);
    }
    let errors: Vec<&str> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.message.as_str())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }

    let backends = select_backends(&config, &cli.backend)?;

    // === Dependency Injection ===
    let gateway = Arc::new(
        HttpGenerationGateway::new(config.timeout()).context("Failed to build HTTP client")?,
    );

    if cli.check {
        let statuses = CheckBackendsUseCase::new(gateway).execute(&backends).await;
        println!("{}", ConsoleFormatter::format_backend_statuses(&statuses));
        return Ok(if statuses.iter().any(|s| s.is_available()) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let items = read_request(cli.input_path())?;
    info!("Read {} items", items.len());

    let input = RunAnalysisInput::new(items, backends.into()).with_limits(config.to_limits());
    let use_case = RunAnalysisUseCase::new(gateway);

    let progress = ProgressMode::detect(cli.quiet).reporter();
    let result = use_case
        .execute_with_progress(input, progress.as_ref())
        .await;

    println!("{}", ConsoleFormatter.render(&result, cli.output));

    Ok(ExitCode::SUCCESS)
}

/// Enabled backends, restricted to those named by `-b` when any are given.
fn select_backends(config: &FileConfig, wanted: &[String]) -> Result<Vec<BackendDescriptor>> {
    let keyed = config.backends.keyed_descriptors();
    if wanted.is_empty() {
        return Ok(keyed.into_iter().map(|(_, backend)| backend).collect());
    }

    for name in wanted {
        let known = keyed.iter().any(|(key, backend)| {
            key.eq_ignore_ascii_case(name) || backend.name.eq_ignore_ascii_case(name)
        });
        if !known {
            let available: Vec<String> = keyed
                .iter()
                .map(|(key, backend)| format!("{} ({})", backend.name, key))
                .collect();
            bail!(
                "Unknown backend '{}'. Enabled backends: {}",
                name,
                available.join(", ")
            );
        }
    }

    Ok(keyed
        .into_iter()
        .filter(|(key, backend)| {
            wanted.iter().any(|name| {
                key.eq_ignore_ascii_case(name) || backend.name.eq_ignore_ascii_case(name)
            })
        })
        .map(|(_, backend)| backend)
        .collect())
}
