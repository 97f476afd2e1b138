//! Directive grammar
//!
//! ```text
//! line      := marker* ws* '@' name '(' params? ')' trailing*
//! params    := param (',' param)*
//! param     := ws* key ws* '=' ws* '"' value '"' ws*
//! ```
//!
//! Values are double-quoted and may contain `\"` and `\\` escapes.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use thiserror::Error;

static DIRECTIVE_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@(?P<name>[A-Za-z_][A-Za-z0-9_]*)\((?P<rest>.*)$")
        .expect("directive head pattern is valid")
});

static PARAMETER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(?P<key>[A-Za-z_][A-Za-z0-9_]*)\s*=\s*"(?P<value>(?:[^"\\]|\\.)*)"\s*"#)
        .expect("parameter pattern is valid")
});

/// Comment markers stripped from the start of a line, longest first
const LEADING_MARKERS: &[&str] = &["///", "//!", "//", "/**", "/*", "*", "#"];

/// Problems found in the parameter list of a directive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("parameter list is not closed with ')'")]
    Unterminated,

    #[error("invalid parameter syntax near '{0}'")]
    InvalidParameter(String),

    #[error("expected ',' or ')' after parameter '{0}'")]
    MissingSeparator(String),

    #[error("parameter '{0}' is given more than once")]
    DuplicateParameter(String),
}

/// A directive found on a comment line, parameters not yet parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDirective<'a> {
    pub name: &'a str,
    /// Everything after the opening parenthesis
    pub arguments: &'a str,
}

impl RawDirective<'_> {
    pub fn parameters(&self) -> Result<BTreeMap<String, String>, DirectiveError> {
        parse_parameters(self.arguments)
    }
}

/// Strip comment markers and surrounding whitespace from a raw comment line
pub fn strip_comment_markers(line: &str) -> &str {
    let mut text = line.trim();

    if let Some(marker) = LEADING_MARKERS.iter().find(|m| text.starts_with(**m)) {
        text = text[marker.len()..].trim_start();
    }

    text.strip_suffix("*/").unwrap_or(text).trim()
}

/// Recognize `@Name(` at the start of a comment line
pub fn parse_directive_line(line: &str) -> Option<RawDirective<'_>> {
    let text = strip_comment_markers(line);
    let captures = DIRECTIVE_HEAD.captures(text)?;

    Some(RawDirective {
        name: captures.name("name")?.as_str(),
        arguments: captures.name("rest")?.as_str(),
    })
}

/// Parse the parameter list that follows the opening parenthesis.
///
/// Anything after the closing parenthesis is ignored.
pub fn parse_parameters(arguments: &str) -> Result<BTreeMap<String, String>, DirectiveError> {
    let mut parameters = BTreeMap::new();
    let mut rest = arguments.trim_start();

    if rest.starts_with(')') {
        return Ok(parameters);
    }

    loop {
        let captures = PARAMETER.captures(rest).ok_or_else(|| {
            if rest.trim().is_empty() {
                DirectiveError::Unterminated
            } else {
                DirectiveError::InvalidParameter(snippet(rest))
            }
        })?;

        let key = captures["key"].to_string();
        let value = unescape(&captures["value"]);
        let matched_len = captures.get(0).map(|m| m.end()).unwrap_or_default();

        if parameters.insert(key.clone(), value).is_some() {
            return Err(DirectiveError::DuplicateParameter(key));
        }

        rest = &rest[matched_len..];
        if let Some(after_comma) = rest.strip_prefix(',') {
            rest = after_comma;
        } else if rest.starts_with(')') {
            return Ok(parameters);
        } else if rest.is_empty() {
            return Err(DirectiveError::Unterminated);
        } else {
            return Err(DirectiveError::MissingSeparator(key));
        }
    }
}

fn unescape(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                value.push(escaped);
            }
        } else {
            value.push(ch);
        }
    }
    value
}

fn snippet(text: &str) -> String {
    text.trim().chars().take(24).collect()
}
