//! Configuration file loading for concept-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CONCEPT_QUORUM_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./concept-quorum.toml` or `./.concept-quorum.toml`
//! 4. Global: `$XDG_CONFIG_HOME/concept-quorum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileAnalysisConfig, FileBackendConfig, FileBackendsConfig, FileConfig};
pub use loader::ConfigLoader;
