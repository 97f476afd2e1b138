//! Declaration model consumed by the generator
//!
//! The model is produced by an upstream source parser and handed to restgen
//! as a finished, read-only snapshot: structs (declarations) with their
//! operations and the fields those operations take and return. Only the
//! comment lines already attached to each item are inspected for directives.

pub mod loader;

pub use loader::*;

use serde::{Deserialize, Serialize};

/// Type-name used by the model for the error return value
pub const ERROR_TYPE: &str = "error";

/// Type-name of the primitive string kind
pub const STRING_TYPE: &str = "string";

/// A batch of declarations produced by one parser run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedSources {
    pub structs: Vec<Declaration>,
}

/// A struct-like declaration that may be exposed as a REST service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Declaration {
    pub doc_lines: Vec<String>,
    pub package_name: String,
    pub name: String,
    pub operations: Vec<Operation>,
}

/// A method of a declaration that may be exposed as a REST endpoint.
///
/// The owning [`Declaration`] is not referenced from here; callers that need
/// it pass the declaration alongside the operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Operation {
    pub doc_lines: Vec<String>,
    pub name: String,
    pub input_args: Vec<Field>,
    pub output_args: Vec<Field>,
}

/// An argument or return value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Field {
    /// Empty for unnamed return values
    pub name: String,
    pub type_name: String,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Unnamed field, as used for return values
    pub fn unnamed(type_name: impl Into<String>) -> Self {
        Self::new(String::new(), type_name)
    }

    pub fn is_error(&self) -> bool {
        self.type_name == ERROR_TYPE
    }

    pub fn is_string(&self) -> bool {
        self.type_name == STRING_TYPE
    }
}

/// Items carrying raw comment lines that may hold directives
pub trait Annotated {
    fn doc_lines(&self) -> &[String];
}

impl Annotated for Declaration {
    fn doc_lines(&self) -> &[String] {
        &self.doc_lines
    }
}

impl Annotated for Operation {
    fn doc_lines(&self) -> &[String] {
        &self.doc_lines
    }
}
