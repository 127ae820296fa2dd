//! Backend configuration from TOML (`[backends]` section)

use concept_domain::{BackendDescriptor, BackendKind, ConfigIssue};
use serde::{Deserialize, Serialize};

/// One configured generation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    pub enabled: bool,
    pub name: String,
    pub endpoint: String,
    pub model: String,
    pub kind: BackendKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: String::new(),
            endpoint: String::new(),
            model: String::new(),
            kind: BackendKind::Ollama,
            temperature: None,
            max_tokens: None,
        }
    }
}

impl FileBackendConfig {
    pub fn ollama() -> Self {
        Self {
            name: "Ollama".to_string(),
            endpoint: "http://localhost:11434".to_string(),
            model: "gpt-oss:20b".to_string(),
            kind: BackendKind::Ollama,
            ..Default::default()
        }
    }

    pub fn lmstudio() -> Self {
        Self {
            name: "LM Studio".to_string(),
            endpoint: "http://localhost:1234".to_string(),
            model: "local-model".to_string(),
            kind: BackendKind::OpenAi,
            ..Default::default()
        }
    }

    pub fn to_descriptor(&self) -> BackendDescriptor {
        BackendDescriptor {
            name: self.name.trim().to_string(),
            endpoint: self.endpoint.trim().to_string(),
            model_id: self.model.trim().to_string(),
            kind: self.kind,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    fn validate(&self, field: &str) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !self.enabled {
            return issues;
        }

        for (key, value) in [
            ("name", &self.name),
            ("endpoint", &self.endpoint),
            ("model", &self.model),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(format!("{}.{} is empty", field, key)));
            }
        }

        let endpoint = self.endpoint.trim();
        if !endpoint.is_empty()
            && !endpoint.starts_with("http://")
            && !endpoint.starts_with("https://")
        {
            issues.push(ConfigIssue::error(format!(
                "{}.endpoint: '{}' is not an http(s) URL",
                field, endpoint
            )));
        }

        if let Some(t) = self.temperature
            && !(0.0..=2.0).contains(&t)
        {
            issues.push(ConfigIssue::warning(format!(
                "{}.temperature: {} is outside 0.0..=2.0",
                field, t
            )));
        }

        issues
    }
}

/// Raw backends configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendsConfig {
    pub ollama: FileBackendConfig,
    pub lmstudio: FileBackendConfig,
    /// Additional backends, queried after the two built-in slots
    pub extra: Vec<FileBackendConfig>,
}

impl Default for FileBackendsConfig {
    fn default() -> Self {
        Self {
            ollama: FileBackendConfig::ollama(),
            lmstudio: FileBackendConfig::lmstudio(),
            extra: Vec::new(),
        }
    }
}

impl FileBackendsConfig {
    /// Every entry with its config key, in query order (disabled ones included).
    fn entries(&self) -> impl Iterator<Item = (String, &FileBackendConfig)> {
        [
            ("ollama".to_string(), &self.ollama),
            ("lmstudio".to_string(), &self.lmstudio),
        ]
        .into_iter()
        .chain(
            self.extra
                .iter()
                .enumerate()
                .map(|(i, b)| (format!("extra[{}]", i), b)),
        )
    }

    /// Enabled backends keyed by their config key, in query order.
    pub fn keyed_descriptors(&self) -> Vec<(String, BackendDescriptor)> {
        self.entries()
            .filter(|(_, b)| b.enabled)
            .map(|(key, b)| (key, b.to_descriptor()))
            .collect()
    }

    /// Enabled backends in query order: ollama, lmstudio, then extras.
    pub fn to_descriptors(&self) -> Vec<BackendDescriptor> {
        self.keyed_descriptors()
            .into_iter()
            .map(|(_, descriptor)| descriptor)
            .collect()
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues: Vec<ConfigIssue> = self
            .entries()
            .flat_map(|(key, b)| b.validate(&format!("backends.{}", key)))
            .collect();

        let enabled = self.keyed_descriptors();
        if enabled.is_empty() {
            issues.push(ConfigIssue::warning(
                "no backends are enabled; every analysis will use the category fallback",
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for (_, descriptor) in &enabled {
            if !descriptor.name.is_empty() && !seen.insert(descriptor.name.to_lowercase()) {
                issues.push(ConfigIssue::warning(format!(
                    "backend name '{}' is used more than once",
                    descriptor.name
                )));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::FileConfig;

    #[test]
    fn test_default_order() {
        let descriptors = FileBackendsConfig::default().to_descriptors();
        let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Ollama", "LM Studio"]);
        assert_eq!(descriptors[1].kind, BackendKind::OpenAi);
    }

    #[test]
    fn test_disabled_slot_and_extras() {
        let toml_str = r#"
[backends.lmstudio]
enabled = false

[[backends.extra]]
name = "vLLM"
endpoint = "http://gpu-box:8000"
model = "qwen2.5"
kind = "openai"
temperature = 0.2

[[backends.extra]]
name = "Remote Ollama"
endpoint = "http://10.0.0.5:11434"
model = "llama3"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let keyed = config.backends.keyed_descriptors();
        let keys: Vec<_> = keyed.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["ollama", "extra[0]", "extra[1]"]);
        assert_eq!(keyed[1].1.temperature, Some(0.2));
        assert_eq!(keyed[2].1.kind, BackendKind::Ollama);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_overriding_one_field_keeps_slot_defaults() {
        let toml_str = r#"
[backends.ollama]
model = "llama3"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let ollama = &config.backends.ollama;
        assert_eq!(ollama.model, "llama3");
        assert_eq!(ollama.endpoint, "http://localhost:11434");
        assert_eq!(ollama.name, "Ollama");
    }

    #[test]
    fn test_invalid_entries_reported() {
        let mut config = FileBackendsConfig::default();
        config.ollama.model = "  ".to_string();
        config.lmstudio.endpoint = "localhost:1234".to_string();
        config.extra.push(FileBackendConfig {
            name: "Ollama".to_string(),
            endpoint: "http://other:11434".to_string(),
            model: "m".to_string(),
            temperature: Some(3.5),
            ..Default::default()
        });

        let issues = config.validate();
        let errors: Vec<_> = issues.iter().filter(|i| i.is_error()).collect();
        let warnings: Vec<_> = issues.iter().filter(|i| !i.is_error()).collect();

        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("backends.ollama.model"));
        assert!(errors[1].message.contains("backends.lmstudio.endpoint"));
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_disabled_backend_not_validated() {
        let mut config = FileBackendsConfig::default();
        config.lmstudio.enabled = false;
        config.lmstudio.endpoint = String::new();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_all_disabled_warns() {
        let mut config = FileBackendsConfig::default();
        config.ollama.enabled = false;
        config.lmstudio.enabled = false;
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }
}
