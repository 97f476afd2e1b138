//! REST semantics of annotated declarations and operations
//!
//! Every query degrades to `false` or an empty string when the directive or
//! parameter it needs is missing; not being REST-exposed is a normal outcome.

use std::sync::Arc;

use super::types::*;
use crate::annotations::{AnnotationRegistry, REST_OPERATION, REST_SERVICE};
use crate::model::{Declaration, Field, Operation};

/// Answers REST questions about the declaration model
#[derive(Debug, Clone)]
pub struct RestResolver {
    registry: Arc<AnnotationRegistry>,
}

impl Default for RestResolver {
    fn default() -> Self {
        Self::new(Arc::new(AnnotationRegistry::rest()))
    }
}

impl RestResolver {
    pub fn new(registry: Arc<AnnotationRegistry>) -> Self {
        Self { registry }
    }

    pub fn is_service(&self, declaration: &Declaration) -> bool {
        self.registry.lookup(declaration, REST_SERVICE).is_some()
    }

    pub fn service_base_path(&self, declaration: &Declaration) -> String {
        self.registry
            .lookup(declaration, REST_SERVICE)
            .map(|a| a.get("path").to_string())
            .unwrap_or_default()
    }

    pub fn is_operation(&self, operation: &Operation) -> bool {
        self.registry.lookup(operation, REST_OPERATION).is_some()
    }

    /// The declared method, uppercased
    pub fn operation_method(&self, operation: &Operation) -> String {
        self.registry
            .lookup(operation, REST_OPERATION)
            .map(|a| a.get("method").to_uppercase())
            .unwrap_or_default()
    }

    /// Service base path followed by the operation's own path.
    ///
    /// No separator handling: the operation path is expected to start with `/`.
    pub fn operation_path(&self, declaration: &Declaration, operation: &Operation) -> String {
        let own_path = self
            .registry
            .lookup(operation, REST_OPERATION)
            .map(|a| a.get("path").to_string())
            .unwrap_or_default();
        format!("{}{}", self.service_base_path(declaration), own_path)
    }

    /// Only POST and PUT decode a request body, whatever the declared arguments
    pub fn has_input(&self, operation: &Operation) -> bool {
        BODY_METHODS.contains(&self.operation_method(operation).as_str())
    }

    /// Type of the body candidate: the first input arg not typed `string`
    pub fn input_arg_type(&self, operation: &Operation) -> String {
        body_candidate(operation)
            .map(|f| f.type_name.clone())
            .unwrap_or_default()
    }

    pub fn input_arg_name(&self, operation: &Operation) -> String {
        body_candidate(operation)
            .map(|f| f.name.clone())
            .unwrap_or_default()
    }

    pub fn input_param_string(&self, operation: &Operation) -> String {
        operation
            .input_args
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn has_output(&self, operation: &Operation) -> bool {
        operation.output_args.iter().any(|f| !f.is_error())
    }

    pub fn output_arg_type(&self, operation: &Operation) -> String {
        operation
            .output_args
            .iter()
            .find(|f| !f.is_error())
            .map(|f| f.type_name.clone())
            .unwrap_or_default()
    }

    pub fn is_primitive(&self, field: &Field) -> bool {
        is_primitive_type(&field.type_name)
    }

    pub fn is_number(&self, field: &Field) -> bool {
        is_number_type(&field.type_name)
    }

    /// Gather all facts about an operation; `None` unless it is annotated
    pub fn resolve(
        &self,
        declaration: &Declaration,
        operation: &Operation,
    ) -> Option<ResolvedEndpoint> {
        if !self.is_operation(operation) {
            return None;
        }

        let operation_path = self.operation_path(declaration, operation);
        let has_input = self.has_input(operation);
        let input_arg_name = self.input_arg_name(operation);

        let arguments = operation
            .input_args
            .iter()
            .map(|field| {
                let scalar = ScalarKind::from_type_name(&field.type_name);
                let kind = if has_input && !input_arg_name.is_empty() && field.name == input_arg_name
                {
                    BindingKind::Body
                } else if scalar.is_none() {
                    BindingKind::Unbound
                } else if has_path_variable(&operation_path, &field.name) {
                    BindingKind::Path
                } else {
                    BindingKind::Query
                };

                ArgumentBinding {
                    name: field.name.clone(),
                    type_name: field.type_name.clone(),
                    kind,
                    scalar,
                }
            })
            .collect();

        Some(ResolvedEndpoint {
            operation_name: operation.name.clone(),
            base_path: self.service_base_path(declaration),
            operation_path,
            http_method: self.operation_method(operation),
            has_input,
            has_output: self.has_output(operation),
            input_binding_kind: if has_input {
                InputBindingKind::Body
            } else {
                InputBindingKind::Scalars
            },
            input_type_name: self.input_arg_type(operation),
            input_arg_name,
            output_type_name: self.output_arg_type(operation),
            param_string: self.input_param_string(operation),
            arguments,
        })
    }

    /// Resolved endpoints of a service, in declared operation order
    pub fn endpoints(&self, declaration: &Declaration) -> Vec<ResolvedEndpoint> {
        declaration
            .operations
            .iter()
            .filter_map(|operation| {
                let endpoint = self.resolve(declaration, operation);
                if endpoint.is_none() {
                    tracing::debug!(
                        service = %declaration.name,
                        operation = %operation.name,
                        "Skipping operation without RestOperation directive"
                    );
                }
                endpoint
            })
            .collect()
    }
}

fn body_candidate(operation: &Operation) -> Option<&Field> {
    operation
        .input_args
        .iter()
        .find(|f| !f.is_string() && !f.is_error())
}

/// Whether the route declares `{name}` or `{name:pattern}`
fn has_path_variable(path: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    path.contains(&format!("{{{name}}}")) || path.contains(&format!("{{{name}:"))
}
