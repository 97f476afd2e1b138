//! Template sources for the generated Go files.
//!
//! The default templates are embedded in the binary at compile time with
//! `rust-embed`, so generation works without any files next to the
//! executable. A directory holding files with the same names can replace
//! them for a run.

use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};

use crate::generation::{ArtifactKind, GenerationError};

/// Templates shipped with restgen
#[derive(RustEmbed)]
#[folder = "templates/"]
pub struct EmbeddedTemplates;

/// Embedded location of the Go templates
const EMBEDDED_PREFIX: &str = "go";

/// Where a template set was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    Directory(PathBuf),
}

/// The handler and test-helper templates used for a run
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub handlers: String,
    pub test_helpers: String,
    pub source: TemplateSource,
}

/// File name of the template rendering an artifact kind
pub fn template_file_name(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Handlers => "service.go.tera",
        ArtifactKind::TestHelpers => "helpers_test.go.tera",
    }
}

impl TemplateSet {
    /// The templates compiled into the binary
    pub fn embedded() -> Result<Self, GenerationError> {
        Ok(Self {
            handlers: embedded_template(ArtifactKind::Handlers)?,
            test_helpers: embedded_template(ArtifactKind::TestHelpers)?,
            source: TemplateSource::Embedded,
        })
    }

    /// Read both templates from `dir`
    pub async fn from_dir(dir: &Path) -> Result<Self, GenerationError> {
        let read = |kind: ArtifactKind| {
            let path = dir.join(template_file_name(kind));
            async move {
                tokio::fs::read_to_string(&path).await.map_err(|e| {
                    GenerationError::TemplateLoadError(format!(
                        "Failed to read template {}: {e}",
                        path.display()
                    ))
                })
            }
        };

        let handlers = read(ArtifactKind::Handlers).await?;
        let test_helpers = read(ArtifactKind::TestHelpers).await?;

        tracing::debug!(dir = %dir.display(), "Loaded templates from directory");

        Ok(Self {
            handlers,
            test_helpers,
            source: TemplateSource::Directory(dir.to_path_buf()),
        })
    }

    /// Directory templates when a directory is given, the embedded ones otherwise
    pub async fn load(dir: Option<&Path>) -> Result<Self, GenerationError> {
        match dir {
            Some(dir) => Self::from_dir(dir).await,
            None => Self::embedded(),
        }
    }

    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Handlers => &self.handlers,
            ArtifactKind::TestHelpers => &self.test_helpers,
        }
    }
}

fn embedded_template(kind: ArtifactKind) -> Result<String, GenerationError> {
    let name = format!("{EMBEDDED_PREFIX}/{}", template_file_name(kind));
    let file = EmbeddedTemplates::get(&name).ok_or_else(|| {
        GenerationError::TemplateLoadError(format!("Embedded template {name} not found"))
    })?;

    String::from_utf8(file.data.into_owned()).map_err(|e| {
        GenerationError::TemplateLoadError(format!("Embedded template {name} is not UTF-8: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_templates_present() {
        let set = TemplateSet::embedded().unwrap();
        assert_eq!(set.source, TemplateSource::Embedded);
        assert!(set.get(ArtifactKind::Handlers).contains("HttpHandler"));
        assert!(set.get(ArtifactKind::TestHelpers).contains("httptest"));
    }

    #[tokio::test]
    async fn test_templates_from_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join("service.go.tera"), "package {{ package_name }}")
            .unwrap();
        std::fs::write(temp_dir.path().join("helpers_test.go.tera"), "package x").unwrap();

        let set = TemplateSet::load(Some(temp_dir.path())).await.unwrap();
        assert_eq!(set.handlers, "package {{ package_name }}");
        assert_eq!(
            set.source,
            TemplateSource::Directory(temp_dir.path().to_path_buf())
        );
    }

    #[tokio::test]
    async fn test_templates_from_dir_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join("service.go.tera"), "x").unwrap();

        let result = TemplateSet::from_dir(temp_dir.path()).await;
        match result {
            Err(GenerationError::TemplateLoadError(message)) => {
                assert!(message.contains("helpers_test.go.tera"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
