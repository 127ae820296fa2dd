//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod analysis;
mod backends;

pub use analysis::FileAnalysisConfig;
pub use backends::{FileBackendConfig, FileBackendsConfig};

use concept_domain::{AnalysisLimits, BackendDescriptor, ConfigIssue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Timeout and prompt limits
    pub analysis: FileAnalysisConfig,
    /// Generation services, queried in a fixed order
    pub backends: FileBackendsConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.analysis.validate();
        issues.extend(self.backends.validate());
        issues
    }

    pub fn to_backends(&self) -> Vec<BackendDescriptor> {
        self.backends.to_descriptors()
    }

    pub fn to_limits(&self) -> AnalysisLimits {
        self.analysis.to_limits()
    }

    pub fn timeout(&self) -> Duration {
        self.analysis.timeout()
    }
}
