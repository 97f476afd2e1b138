//! Configuration for a generation run
//!
//! All settings have defaults, so a run works without any configuration
//! file. A TOML file can override the output layout, point at a custom
//! template directory and change the error-response table used by the
//! generated handlers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::generation::ArtifactKind;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputSettings,
    pub templates: TemplateSettings,
    pub errors: ErrorStatusTable,
}

/// Where and under which names generated files are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output directory; the model file's directory when unset
    pub dir: Option<PathBuf>,
    pub file_prefix: String,
    pub helpers_suffix: String,
    pub extension: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: None,
            file_prefix: "http".to_string(),
            helpers_suffix: "Helpers_test".to_string(),
            extension: "go".to_string(),
        }
    }
}

impl OutputSettings {
    /// File name of an artifact for the service `service_name`, e.g. `httpMyService.go`
    pub fn file_name(&self, kind: ArtifactKind, service_name: &str) -> String {
        match kind {
            ArtifactKind::Handlers => {
                format!("{}{}.{}", self.file_prefix, service_name, self.extension)
            }
            ArtifactKind::TestHelpers => format!(
                "{}{}{}.{}",
                self.file_prefix, service_name, self.helpers_suffix, self.extension
            ),
        }
    }
}

/// Template override settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory holding `service.go.tera` and `helpers_test.go.tera`
    pub dir: Option<PathBuf>,
}

/// Mapping from logical failure to the status constant written by handlers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorStatusTable {
    /// Status for path/query/body input that cannot be decoded
    pub invalid_input: String,
    /// Status for a failed service call
    pub failure: String,
    /// Failure status overrides keyed by uppercase method
    pub per_method: BTreeMap<String, String>,
}

impl Default for ErrorStatusTable {
    fn default() -> Self {
        Self {
            invalid_input: "http.StatusBadRequest".to_string(),
            failure: "http.StatusInternalServerError".to_string(),
            per_method: BTreeMap::new(),
        }
    }
}

impl ErrorStatusTable {
    pub fn failure_status(&self, method: &str) -> &str {
        self.per_method
            .get(&method.to_uppercase())
            .map(String::as_str)
            .unwrap_or(&self.failure)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.output.extension.is_empty() {
            return Err(Error::config("output.extension must not be empty"));
        }
        if self.errors.invalid_input.is_empty() || self.errors.failure.is_empty() {
            return Err(Error::config("error statuses must not be empty"));
        }
        Ok(())
    }

    /// Output directory for a model file, honoring the configured directory first
    pub fn output_dir_for(&self, model_path: &Path) -> PathBuf {
        self.output.dir.clone().unwrap_or_else(|| {
            model_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }
}
