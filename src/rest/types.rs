//! Facts derived for a REST endpoint

use serde::Serialize;
use std::fmt;

/// Type-names treated as numbers
pub const NUMBER_TYPES: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
    "byte", "rune", "float32", "float64",
];

/// Type-names treated as primitives: the numbers plus string and bool
pub const PRIMITIVE_TYPES: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
    "byte", "rune", "float32", "float64", "string", "bool",
];

/// HTTP methods whose request carries a body to decode
pub const BODY_METHODS: &[&str] = &["POST", "PUT"];

pub fn is_primitive_type(type_name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&type_name)
}

pub fn is_number_type(type_name: &str) -> bool {
    NUMBER_TYPES.contains(&type_name)
}

/// How a primitive value is read from its textual path/query form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "bits", rename_all = "snake_case")]
pub enum ScalarKind {
    Text,
    Bool,
    /// Platform-sized `int`
    Int,
    Signed(u8),
    /// Bit size 0 means platform-sized
    Unsigned(u8),
    Float(u8),
}

impl ScalarKind {
    /// Classify a primitive type-name; `None` for anything else
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        let kind = match type_name {
            "string" => Self::Text,
            "bool" => Self::Bool,
            "int" => Self::Int,
            "int8" => Self::Signed(8),
            "int16" => Self::Signed(16),
            "int32" | "rune" => Self::Signed(32),
            "int64" => Self::Signed(64),
            "uint" => Self::Unsigned(0),
            "uint8" | "byte" => Self::Unsigned(8),
            "uint16" => Self::Unsigned(16),
            "uint32" => Self::Unsigned(32),
            "uint64" => Self::Unsigned(64),
            "float32" => Self::Float(32),
            "float64" => Self::Float(64),
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Self::Int | Self::Signed(_) | Self::Unsigned(_) | Self::Float(_)
        )
    }
}

/// Where an input argument's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// `{name}` segment of the route
    Path,
    /// Query string parameter
    Query,
    /// Decoded request body
    Body,
    /// Compound argument that no binding covers
    Unbound,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Path => write!(f, "path"),
            BindingKind::Query => write!(f, "query"),
            BindingKind::Body => write!(f, "body"),
            BindingKind::Unbound => write!(f, "unbound"),
        }
    }
}

/// Overall input strategy of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputBindingKind {
    /// Only path/query scalars are read
    Scalars,
    /// A request body is decoded in addition to any scalars
    Body,
}

/// Binding decided for one input argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentBinding {
    pub name: String,
    pub type_name: String,
    pub kind: BindingKind,
    /// Set for primitive arguments
    pub scalar: Option<ScalarKind>,
}

/// Everything the generator needs to know about one annotated operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEndpoint {
    pub operation_name: String,
    pub base_path: String,
    /// Base path and operation path concatenated
    pub operation_path: String,
    pub http_method: String,
    pub has_input: bool,
    pub has_output: bool,
    pub input_binding_kind: InputBindingKind,
    /// Empty when no argument qualifies for the body
    pub input_type_name: String,
    pub input_arg_name: String,
    pub output_type_name: String,
    /// Comma-joined input argument names in declared order
    pub param_string: String,
    pub arguments: Vec<ArgumentBinding>,
}

impl ResolvedEndpoint {
    /// Arguments read from the path or query string, in declared order
    pub fn scalar_arguments(&self) -> impl Iterator<Item = &ArgumentBinding> {
        self.arguments
            .iter()
            .filter(|a| matches!(a.kind, BindingKind::Path | BindingKind::Query))
    }

    pub fn body_argument(&self) -> Option<&ArgumentBinding> {
        self.arguments.iter().find(|a| a.kind == BindingKind::Body)
    }
}
