//! Render context for the Go handler and test-helper templates
//!
//! The resolver answers REST questions in target-neutral terms; this module
//! turns those answers into the Go fragments the templates splice in (parse
//! calls, quoted routes, import lists). Nothing here touches the filesystem,
//! so the same declaration always yields the same context.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::ErrorStatusTable;
use crate::model::Declaration;
use crate::rest::{ArgumentBinding, BindingKind, ResolvedEndpoint, RestResolver, ScalarKind};

static ROUTE_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{(?P<name>[A-Za-z_][A-Za-z0-9_]*)(?::(?P<pattern>[^}]*))?\}")
        .expect("route variable pattern is valid")
});

const GENERATOR_NAME: &str = "restgen";
const MUX_IMPORT: &str = "github.com/gorilla/mux";

/// Identifiers the generated handler declares itself
const HANDLER_LOCALS: &[&str] = &["w", "r", "err", "result", "service"];

/// Context for one service: both templates render from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceContext {
    pub generator: String,
    pub package_name: String,
    pub service_name: String,
    pub base_path: String,
    pub handler_imports: Vec<String>,
    pub helper_imports: Vec<String>,
    pub endpoints: Vec<EndpointContext>,
}

/// Context for one endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointContext {
    pub name: String,
    pub method: String,
    pub path: String,
    pub path_literal: String,
    pub has_input: bool,
    /// Input present and an argument qualifies for the body
    pub decode_body: bool,
    pub input_arg_name: String,
    pub input_arg_type: String,
    pub has_output: bool,
    pub output_arg_type: String,
    pub param_string: String,
    pub scalars: Vec<ScalarArgContext>,
    /// Arguments with no request source, passed as zero values
    pub unbound: Vec<UnboundArgContext>,
    pub invalid_input_status: String,
    pub failure_status: String,
    pub helper_name: String,
    pub test_url_name: String,
    pub test_url_literal: String,
}

/// A path or query argument and the Go expressions that read it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarArgContext {
    pub name: String,
    pub type_name: String,
    pub binding: BindingKind,
    /// Expression yielding the raw string value
    pub raw_expr: String,
    /// `strconv` call for non-string kinds
    pub parse_expr: Option<String>,
}

/// An argument declared with its zero value before the service call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnboundArgContext {
    pub name: String,
    pub type_name: String,
}

/// Build the render context of a service declaration
pub fn build_service_context(
    resolver: &RestResolver,
    errors: &ErrorStatusTable,
    declaration: &Declaration,
) -> ServiceContext {
    let endpoints: Vec<EndpointContext> = resolver
        .endpoints(declaration)
        .iter()
        .filter(|endpoint| {
            let clash = clashing_argument(endpoint);
            if let Some(name) = clash {
                tracing::warn!(
                    service = %declaration.name,
                    operation = %endpoint.operation_name,
                    argument = %name,
                    "Skipping operation whose argument name clashes with a handler local"
                );
            }
            clash.is_none()
        })
        .map(|endpoint| build_endpoint_context(endpoint, errors))
        .collect();

    tracing::debug!(
        service = %declaration.name,
        endpoints = endpoints.len(),
        "Built service context"
    );

    ServiceContext {
        generator: GENERATOR_NAME.to_string(),
        package_name: declaration.package_name.clone(),
        service_name: declaration.name.clone(),
        base_path: resolver.service_base_path(declaration),
        handler_imports: handler_imports(&endpoints),
        helper_imports: helper_imports(&endpoints),
        endpoints,
    }
}

fn build_endpoint_context(endpoint: &ResolvedEndpoint, errors: &ErrorStatusTable) -> EndpointContext {
    let scalars: Vec<ScalarArgContext> = endpoint
        .scalar_arguments()
        .filter_map(scalar_context)
        .collect();
    let test_url = placeholder_url(&endpoint.operation_path, &endpoint.arguments);

    EndpointContext {
        name: endpoint.operation_name.clone(),
        method: endpoint.http_method.clone(),
        path: endpoint.operation_path.clone(),
        path_literal: go_quote(&endpoint.operation_path),
        has_input: endpoint.has_input,
        decode_body: endpoint.body_argument().is_some(),
        input_arg_name: endpoint.input_arg_name.clone(),
        input_arg_type: endpoint.input_type_name.clone(),
        has_output: endpoint.has_output,
        output_arg_type: endpoint.output_type_name.clone(),
        param_string: endpoint.param_string.clone(),
        scalars,
        unbound: endpoint
            .arguments
            .iter()
            .filter(|a| a.kind == BindingKind::Unbound)
            .map(|a| UnboundArgContext {
                name: a.name.clone(),
                type_name: a.type_name.clone(),
            })
            .collect(),
        invalid_input_status: errors.invalid_input.clone(),
        failure_status: errors.failure_status(&endpoint.http_method).to_string(),
        helper_name: format!("{}TestHelper", endpoint.operation_name),
        test_url_name: format!("{}TestURL", endpoint.operation_name),
        test_url_literal: go_quote(&test_url),
    }
}

/// First argument that would shadow or redeclare a generated local
fn clashing_argument(endpoint: &ResolvedEndpoint) -> Option<&str> {
    endpoint
        .arguments
        .iter()
        .map(|a| a.name.as_str())
        .find(|name| HANDLER_LOCALS.contains(name))
}

fn scalar_context(argument: &ArgumentBinding) -> Option<ScalarArgContext> {
    let kind = argument.scalar?;
    let raw_expr = match argument.kind {
        BindingKind::Path => format!("mux.Vars(r)[{}]", go_quote(&argument.name)),
        BindingKind::Query => format!("r.URL.Query().Get({})", go_quote(&argument.name)),
        BindingKind::Body | BindingKind::Unbound => return None,
    };

    Some(ScalarArgContext {
        name: argument.name.clone(),
        type_name: argument.type_name.clone(),
        binding: argument.kind,
        parse_expr: parse_expr(kind, &raw_expr),
        raw_expr,
    })
}

/// `strconv` call converting `raw` to the scalar kind; `None` for strings
fn parse_expr(kind: ScalarKind, raw: &str) -> Option<String> {
    match kind {
        ScalarKind::Text => None,
        ScalarKind::Bool => Some(format!("strconv.ParseBool({raw})")),
        ScalarKind::Int => Some(format!("strconv.Atoi({raw})")),
        ScalarKind::Signed(bits) => Some(format!("strconv.ParseInt({raw}, 10, {bits})")),
        ScalarKind::Unsigned(bits) => Some(format!("strconv.ParseUint({raw}, 10, {bits})")),
        ScalarKind::Float(bits) => Some(format!("strconv.ParseFloat({raw}, {bits})")),
    }
}

fn placeholder_value(argument: &ArgumentBinding) -> String {
    match argument.scalar {
        Some(ScalarKind::Text) | None => format!("test-{}", argument.name),
        Some(ScalarKind::Bool) => "true".to_string(),
        Some(_) => "1".to_string(),
    }
}

/// Placeholder accepted by a route variable pattern such as `[0-9]+`.
///
/// Falls back to `value` when no candidate matches or the pattern is not a
/// valid regex.
fn fit_pattern(pattern: &str, value: String) -> String {
    let Ok(matcher) = Regex::new(&format!("^(?:{pattern})$")) else {
        return value;
    };
    if matcher.is_match(&value) {
        return value;
    }
    ["1", "test", "true", "a"]
        .into_iter()
        .find(|candidate| matcher.is_match(candidate))
        .map(str::to_string)
        .unwrap_or(value)
}

/// Route with every `{var}` filled in and query arguments appended
fn placeholder_url(path: &str, arguments: &[ArgumentBinding]) -> String {
    let mut url = ROUTE_VARIABLE
        .replace_all(path, |captures: &Captures| {
            let name = &captures["name"];
            let value = arguments
                .iter()
                .find(|a| a.name == name && a.kind == BindingKind::Path)
                .map(placeholder_value)
                .unwrap_or_else(|| format!("test-{name}"));
            match captures.name("pattern") {
                Some(pattern) => fit_pattern(pattern.as_str(), value),
                None => value,
            }
        })
        .into_owned();

    let query: Vec<String> = arguments
        .iter()
        .filter(|a| a.kind == BindingKind::Query)
        .map(|a| format!("{}={}", a.name, placeholder_value(a)))
        .collect();
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }
    url
}

fn handler_imports(endpoints: &[EndpointContext]) -> Vec<String> {
    let mut imports = BTreeSet::from(["net/http"]);
    if !endpoints.is_empty() {
        imports.insert("fmt");
    }
    if endpoints.iter().any(|e| e.decode_body || e.has_output) {
        imports.insert("encoding/json");
    }
    if endpoints.iter().any(|e| e.has_output) {
        imports.insert("log");
    }
    if endpoints
        .iter()
        .flat_map(|e| e.scalars.iter())
        .any(|s| s.parse_expr.is_some())
    {
        imports.insert("strconv");
    }

    imports
        .into_iter()
        .chain(std::iter::once(MUX_IMPORT))
        .map(str::to_string)
        .collect()
}

fn helper_imports(endpoints: &[EndpointContext]) -> Vec<String> {
    if endpoints.is_empty() {
        return Vec::new();
    }

    let mut imports = BTreeSet::from(["net/http", "net/http/httptest", "testing"]);
    if endpoints.iter().any(|e| e.decode_body) {
        imports.insert("bytes");
        imports.insert("encoding/json");
    }
    if endpoints.iter().any(|e| e.has_output) {
        imports.insert("encoding/json");
    }
    imports.into_iter().map(str::to_string).collect()
}

/// Go interpreted string literal
fn go_quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
