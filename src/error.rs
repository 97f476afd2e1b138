//! Error handling for loading the inputs of a restgen run.
//!
//! This module defines the crate-level `Error` type used while reading the
//! declaration model and the configuration file, along with a convenient
//! `Result` alias. Failures that happen while rendering or writing generated
//! code live in [`crate::generation::GenerationError`].
//!
//! # Examples
//!
//! ```
//! use restgen::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("output.extension must not be empty"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for restgen input handling
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for restgen input handling
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Declaration model error
    #[error("Model error: {0}")]
    Model(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new model error
    pub fn model<S: Into<String>>(msg: S) -> Self {
        Self::Model(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_config_creation() {
        let error = Error::config("Invalid configuration");
        assert!(matches!(error, Error::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_error_model_creation() {
        let error = Error::model("declaration without a name");
        assert!(matches!(error, Error::Model(_)));
        assert_eq!(error.to_string(), "Model error: declaration without a name");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
        assert!(error.to_string().contains("I/O error"));
        assert!(error.to_string().contains("File not found"));
    }

    #[test]
    fn test_error_from_serde_json_error() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid json");
        let error: Error = json_result.unwrap_err().into();
        assert!(matches!(error, Error::Json(_)));
        assert!(error.to_string().contains("JSON parsing error"));
    }

    #[test]
    fn test_error_from_toml_error() {
        let toml_result: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let error: Error = toml_result.unwrap_err().into();
        assert!(matches!(error, Error::Toml(_)));
    }
}
