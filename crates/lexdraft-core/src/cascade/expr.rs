//! Cascade expressions, parsed once per rule

use serde_json::Value;

use crate::model::{display_value, ValueMap};

/// Path segments never followed when resolving a dotted path
pub const BLOCKED_SEGMENTS: [&str; 3] = ["__proto__", "constructor", "prototype"];

const SOURCE_TOKEN: &str = "$value";

/// A parsed cascade expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `$value`: the changed variable's new value, verbatim
    SourceValue,
    /// Text with no references
    Literal(Value),
    /// `otherVariable`
    VariableRef(String),
    /// `otherVariable.field`
    FieldAccess { variable: String, field: String },
    /// `otherVariable.$field`, read from derived values
    DerivedRef { variable: String, field: String },
    /// Text containing `{{token}}` placeholders
    Interpolated(Vec<Segment>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Token(String),
}

impl Expression {
    /// Parse `source`. `is_variable` says which bare identifiers name a
    /// variable of the template; anything else reads as literal text.
    pub fn parse(source: &str, is_variable: impl Fn(&str) -> bool) -> Self {
        let trimmed = source.trim();
        if trimmed == SOURCE_TOKEN {
            return Expression::SourceValue;
        }
        if source.contains("{{") {
            let segments = parse_segments(source);
            if segments.iter().any(|s| matches!(s, Segment::Token(_))) {
                return Expression::Interpolated(segments);
            }
        }
        if is_identifier(trimmed) && is_variable(trimmed) {
            return Expression::VariableRef(trimmed.to_string());
        }
        if let Some((variable, field)) = trimmed.split_once('.') {
            if is_identifier(variable) && is_variable(variable) {
                if let Some(derived) = field.strip_prefix('$') {
                    if is_identifier(derived) {
                        return Expression::DerivedRef {
                            variable: variable.to_string(),
                            field: derived.to_string(),
                        };
                    }
                } else if is_identifier(field) {
                    return Expression::FieldAccess {
                        variable: variable.to_string(),
                        field: field.to_string(),
                    };
                }
            }
        }
        Expression::Literal(Value::String(source.to_string()))
    }

    /// Compute the expression's value, or `None` when it cannot be resolved
    pub fn evaluate(&self, source: &Value, values: &ValueMap, derived: &ValueMap) -> Option<Value> {
        match self {
            Expression::SourceValue => Some(source.clone()),
            Expression::Literal(value) => Some(value.clone()),
            Expression::VariableRef(id) => values.get(id).cloned(),
            Expression::FieldAccess { variable, field } => {
                if is_blocked(field) {
                    tracing::warn!(variable = %variable, field = %field, "blocked path segment in cascade expression");
                    return None;
                }
                values.get(variable)?.get(field.as_str()).cloned()
            }
            Expression::DerivedRef { variable, field } => {
                derived.get(&format!("{}.{}", variable, field)).cloned()
            }
            Expression::Interpolated(segments) => {
                let mut out = String::new();
                for segment in segments {
                    match segment {
                        Segment::Text(text) => out.push_str(text),
                        Segment::Token(token) => match resolve_token(token, source, values, derived) {
                            Some(value) => out.push_str(&display_value(&value)),
                            None => {
                                out.push_str("{{");
                                out.push_str(token);
                                out.push_str("}}");
                            }
                        },
                    }
                }
                Some(Value::String(out))
            }
        }
    }
}

/// Resolve one `{{token}}`: derived values first, then a dotted path into
/// values, then the token as a plain key
fn resolve_token(token: &str, source: &Value, values: &ValueMap, derived: &ValueMap) -> Option<Value> {
    let key = token.trim();
    if key == SOURCE_TOKEN {
        return Some(source.clone());
    }
    if let Some(value) = derived.get(key) {
        return Some(value.clone());
    }
    if let Some(value) = lookup_path(values, key) {
        return Some(value.clone());
    }
    values.get(key).cloned()
}

/// Follow `a.b.0.c` through objects and arrays.
///
/// Returns `None` (with a warning) when any segment is blocked.
pub fn lookup_path<'a>(values: &'a ValueMap, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let head = segments.next()?;
    if is_blocked(head) {
        tracing::warn!(path = %path, "blocked path segment");
        return None;
    }
    let mut current = values.get(head)?;
    for segment in segments {
        if is_blocked(segment) {
            tracing::warn!(path = %path, "blocked path segment");
            return None;
        }
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

pub fn is_blocked(segment: &str) -> bool {
    BLOCKED_SEGMENTS.contains(&segment)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn parse_segments(source: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = source;
    while let Some(open) = rest.find("{{") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            break;
        };
        if open > 0 {
            segments.push(Segment::Text(rest[..open].to_string()));
        }
        segments.push(Segment::Token(after[..close].trim().to_string()));
        rest = &after[close + 2..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest.to_string()));
    }
    segments
}
