//! Registration table of the directives restgen understands

use std::collections::BTreeMap;

use super::Annotation;
use super::parser::parse_directive_line;
use crate::model::Annotated;

/// Name of the directive marking a declaration as a REST service
pub const REST_SERVICE: &str = "RestService";

/// Name of the directive marking an operation as a REST endpoint
pub const REST_OPERATION: &str = "RestOperation";

/// A registered directive and the parameters it accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveSpec {
    pub name: String,
    pub parameters: Vec<String>,
}

impl DirectiveSpec {
    pub fn accepts(&self, parameter: &str) -> bool {
        self.parameters.iter().any(|p| p == parameter)
    }
}

/// Immutable set of recognized directives.
///
/// Built once before generation starts and shared read-only afterwards;
/// directives that are not registered are never reported by [`lookup`].
///
/// [`lookup`]: AnnotationRegistry::lookup
#[derive(Debug, Clone, Default)]
pub struct AnnotationRegistry {
    directives: BTreeMap<String, DirectiveSpec>,
}

/// Builder for [`AnnotationRegistry`]
#[derive(Debug, Default)]
pub struct AnnotationRegistryBuilder {
    directives: BTreeMap<String, DirectiveSpec>,
}

impl AnnotationRegistryBuilder {
    /// Register a directive; registering a name again replaces the earlier entry
    pub fn register(mut self, name: &str, parameters: &[&str]) -> Self {
        self.directives.insert(
            name.to_string(),
            DirectiveSpec {
                name: name.to_string(),
                parameters: parameters.iter().map(|p| p.to_string()).collect(),
            },
        );
        self
    }

    pub fn build(self) -> AnnotationRegistry {
        AnnotationRegistry {
            directives: self.directives,
        }
    }
}

impl AnnotationRegistry {
    pub fn builder() -> AnnotationRegistryBuilder {
        AnnotationRegistryBuilder::default()
    }

    /// The REST directive table: `RestService{path}` and `RestOperation{path, method}`
    pub fn rest() -> Self {
        Self::builder()
            .register(REST_SERVICE, &["path"])
            .register(REST_OPERATION, &["path", "method"])
            .build()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }

    pub fn spec(&self, name: &str) -> Option<&DirectiveSpec> {
        self.directives.get(name)
    }

    /// Find the first comment line of `item` carrying the directive `name`.
    ///
    /// Returns `None` when the directive is absent or not registered. A
    /// matching line with a malformed parameter list still yields an
    /// annotation, with no parameters.
    pub fn lookup<A: Annotated + ?Sized>(&self, item: &A, name: &str) -> Option<Annotation> {
        let spec = self.directives.get(name)?;

        let raw = item
            .doc_lines()
            .iter()
            .filter_map(|line| parse_directive_line(line))
            .find(|raw| raw.name == name)?;

        let mut parameters = raw.parameters().unwrap_or_else(|e| {
            tracing::warn!(
                directive = %name,
                error = %e,
                "Malformed directive parameters, treating as empty"
            );
            BTreeMap::new()
        });

        parameters.retain(|key, _| {
            let accepted = spec.accepts(key);
            if !accepted {
                tracing::debug!(
                    directive = %name,
                    parameter = %key,
                    "Dropping parameter not registered for directive"
                );
            }
            accepted
        });

        Some(Annotation::new(name, parameters))
    }
}
