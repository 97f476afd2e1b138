//! Core types for the generation domain

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::generation::GenerationError;

/// The two files produced for every service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Dispatcher registration and request handlers
    Handlers,
    /// Test helpers, one per endpoint
    TestHelpers,
}

impl ArtifactKind {
    pub fn all() -> [ArtifactKind; 2] {
        [ArtifactKind::Handlers, ArtifactKind::TestHelpers]
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Handlers => write!(f, "handlers"),
            ArtifactKind::TestHelpers => write!(f, "test-helpers"),
        }
    }
}

/// Rendered text not yet placed on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub kind: ArtifactKind,
    pub content: String,
}

/// Generated artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub content: String,
}

/// Files written for one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedService {
    pub declaration: String,
    pub endpoints: usize,
    pub paths: Vec<PathBuf>,
}

/// Outcome of a batch run; failures do not stop the remaining declarations
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub generated: Vec<GeneratedService>,
    /// Declarations without a RestService directive
    pub skipped: Vec<String>,
    /// One `DeclarationFailed` per failed declaration
    pub failures: Vec<GenerationError>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn written_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.generated.iter().flat_map(|s| s.paths.iter())
    }

    pub fn failed_declarations(&self) -> Vec<&str> {
        self.failures
            .iter()
            .filter_map(GenerationError::declaration)
            .collect()
    }

    /// Collapse the report into a single result.
    ///
    /// A lone failure is returned as is; several are summarized in
    /// `BatchFailed`.
    pub fn into_result(mut self) -> Result<Vec<GeneratedService>, GenerationError> {
        match self.failures.len() {
            0 => Ok(self.generated),
            1 => Err(self.failures.remove(0)),
            _ => Err(GenerationError::BatchFailed {
                declarations: self
                    .failed_declarations()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(name: &str) -> GenerationError {
        GenerationError::for_declaration(name, GenerationError::RenderError("boom".to_string()))
    }

    #[test]
    fn test_artifact_kind_display() {
        assert_eq!(ArtifactKind::Handlers.to_string(), "handlers");
        assert_eq!(ArtifactKind::TestHelpers.to_string(), "test-helpers");
        assert_eq!(ArtifactKind::all().len(), 2);
    }

    #[test]
    fn test_report_success() {
        let report = GenerationReport {
            generated: vec![GeneratedService {
                declaration: "MyService".to_string(),
                endpoints: 1,
                paths: vec![PathBuf::from("a.go"), PathBuf::from("b.go")],
            }],
            ..Default::default()
        };

        assert!(report.is_success());
        assert_eq!(report.written_paths().count(), 2);
        assert_eq!(report.into_result().unwrap().len(), 1);
    }

    #[test]
    fn test_report_single_failure() {
        let report = GenerationReport {
            failures: vec![failure("Second")],
            ..Default::default()
        };

        assert!(!report.is_success());
        let error = report.into_result().unwrap_err();
        assert_eq!(error.declaration(), Some("Second"));
    }

    #[test]
    fn test_report_multiple_failures() {
        let report = GenerationReport {
            failures: vec![failure("A"), failure("B")],
            ..Default::default()
        };

        assert_eq!(report.failed_declarations(), vec!["A", "B"]);
        match report.into_result().unwrap_err() {
            GenerationError::BatchFailed { declarations } => {
                assert_eq!(declarations, vec!["A".to_string(), "B".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
