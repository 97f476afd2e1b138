//! Delivery of generated artifacts

pub mod filesystem_output;

pub use filesystem_output::*;

use async_trait::async_trait;
use std::path::Path;

use crate::generation::{Artifact, GenerationError};

/// Destination for generated artifacts
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write all artifacts to the output destination
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<(), GenerationError>;

    /// Ensure a directory exists
    async fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError>;
}
