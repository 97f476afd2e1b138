//! Filesystem-based output service implementation

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::generation::{Artifact, GenerationError};
use crate::output::OutputService;

/// Output service that writes artifacts to the filesystem.
///
/// Every file is written to a temporary sibling and renamed into place, so
/// a reader never observes a half-written file.
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<(), GenerationError> {
        for artifact in artifacts {
            let path = artifact.path.clone();
            let content = artifact.content.clone();

            tokio::task::spawn_blocking(move || write_atomic(&path, content.as_bytes()))
                .await
                .map_err(|e| GenerationError::OutputError {
                    path: artifact.path.clone(),
                    source: std::io::Error::other(e),
                })??;

            tracing::debug!(path = %artifact.path.display(), kind = %artifact.kind, "Wrote artifact");
        }

        Ok(())
    }

    async fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|source| GenerationError::OutputError {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<(), GenerationError> {
    let output_error = |source: std::io::Error| GenerationError::OutputError {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(output_error)?;

    let mut file = NamedTempFile::new_in(&parent).map_err(output_error)?;
    file.write_all(content).map_err(output_error)?;
    file.flush().map_err(output_error)?;
    file.persist(path).map_err(|e| output_error(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ArtifactKind;
    use tempfile::TempDir;

    fn artifact(path: PathBuf, content: &str) -> Artifact {
        Artifact {
            kind: ArtifactKind::Handlers,
            path,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_write_artifacts_creates_parents() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested/out/httpMyService.go");

        FileSystemOutputService::new()
            .write_artifacts(&[artifact(path.clone(), "package testData\n")])
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "package testData\n");
    }

    #[tokio::test]
    async fn test_write_artifacts_replaces_existing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("httpMyService.go");
        std::fs::write(&path, "old content that is longer").unwrap();

        FileSystemOutputService::new()
            .write_artifacts(&[artifact(path.clone(), "new")])
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        // no temporary files left behind
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_write_artifacts_reports_path_on_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("httpBlocked.go");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let result = FileSystemOutputService::new()
            .write_artifacts(&[artifact(path.clone(), "package x\n")])
            .await;

        match result {
            Err(GenerationError::OutputError { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ensure_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dir = temp_dir.path().join("a/b");

        FileSystemOutputService::new()
            .ensure_directory(&dir)
            .await
            .unwrap();
        assert!(dir.is_dir());
    }
}
