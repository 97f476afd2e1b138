//! Port interfaces for the generation domain

use crate::generation::{GenerationError, RenderedFile, ServiceContext};

/// Renders the files of one service from its context
pub trait TemplateRenderer: Send + Sync {
    /// Render every artifact kind, handlers first
    fn render(&self, context: &ServiceContext) -> Result<Vec<RenderedFile>, GenerationError>;
}
