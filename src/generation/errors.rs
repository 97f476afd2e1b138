//! Error types for the generation domain

use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rendering or delivering generated code
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Template load error: {0}")]
    TemplateLoadError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Failed to write {}: {source}", .path.display())]
    OutputError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Generation failed for declaration '{declaration}': {source}")]
    DeclarationFailed {
        declaration: String,
        #[source]
        source: Box<GenerationError>,
    },

    #[error("Generation failed for {} declarations: {}", .declarations.len(), .declarations.join(", "))]
    BatchFailed { declarations: Vec<String> },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl GenerationError {
    /// Wrap an error with the name of the declaration it belongs to
    pub fn for_declaration(declaration: impl Into<String>, source: GenerationError) -> Self {
        Self::DeclarationFailed {
            declaration: declaration.into(),
            source: Box::new(source),
        }
    }

    /// Name of the failed declaration, when the error identifies one
    pub fn declaration(&self) -> Option<&str> {
        match self {
            Self::DeclarationFailed { declaration, .. } => Some(declaration),
            _ => None,
        }
    }
}

impl From<tera::Error> for GenerationError {
    fn from(error: tera::Error) -> Self {
        // tera keeps the useful detail in the source chain
        let mut message = error.to_string();
        let mut source = StdError::source(&error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::RenderError(message)
    }
}
