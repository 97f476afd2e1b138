//! Annotation index: directives embedded in comment lines
//!
//! Declarations and operations carry their documentation comments as raw
//! lines. A line such as `// @RestService(path = "/api")` marks the item
//! with a directive whose parameters are parsed into a key/value map. The
//! set of directives that count is fixed by an [`AnnotationRegistry`].

pub mod parser;
pub mod registry;

pub use parser::{DirectiveError, RawDirective};
pub use registry::*;

use std::collections::BTreeMap;

/// A directive found on a declaration or operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    name: String,
    parameters: BTreeMap<String, String>,
}

impl Annotation {
    pub fn new(name: impl Into<String>, parameters: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of a parameter, or an empty string when it was not given
    pub fn get(&self, key: &str) -> &str {
        self.parameters.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }
}
