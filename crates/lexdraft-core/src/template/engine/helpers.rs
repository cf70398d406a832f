//! Helper functions for template rendering

use std::cmp::Ordering;

use serde_json::Value;

use super::dates::{format_date, parse_date};
use crate::cascade::expr::is_blocked;
use crate::model::{display_value, is_empty_value};
use crate::template::error::TemplateError;
use crate::variables::validation::as_number;
use crate::variables::visibility::loose_eq;

/// Inline helpers callable as `{{name arg ...}}` or `(name arg ...)`
pub(crate) const INLINE_HELPERS: [&str; 25] = [
    "eq",
    "ne",
    "lt",
    "gt",
    "lte",
    "gte",
    "and",
    "or",
    "not",
    "upper",
    "lower",
    "capitalize",
    "trim",
    "concat",
    "replace",
    "formatDate",
    "length",
    "first",
    "last",
    "join",
    "derived",
    "pluralize",
    "default",
    "numbering",
    "today",
];

pub(crate) fn is_inline_helper(name: &str) -> bool {
    INLINE_HELPERS.contains(&name)
}

/// Resolve a dotted key (objects by name, arrays by index)
pub(crate) fn resolve_key<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = data;
    for part in key.split('.') {
        if is_blocked(part) {
            tracing::warn!(key = %key, "blocked path segment in template");
            return None;
        }
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Stringify a value for template output.
///
/// Arrays are joined with ", "; objects must be addressed field by field.
pub(crate) fn stringify_value(value: &Value, key: &str, line: usize) -> Result<String, TemplateError> {
    match value {
        Value::Object(_) => Err(TemplateError::ObjectInPlaceholder {
            key: key.to_string(),
            line,
        }),
        Value::Array(items) => Ok(items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", ")),
        other => Ok(display_value(other)),
    }
}

/// Truthiness for `if`/`unless` and boolean helpers
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// What helpers may read besides their arguments
pub(crate) struct HelperEnv<'a> {
    /// Root render context, for `derived`
    pub root: &'a Value,
    pub default_date_format: &'a str,
}

/// Call an inline helper other than `numbering`
pub(crate) fn call_helper(
    name: &str,
    args: &[Value],
    env: &HelperEnv<'_>,
    line: usize,
) -> Result<Value, TemplateError> {
    let arg = |index: usize| args.get(index).unwrap_or(&Value::Null);
    let text = |index: usize| display_value(arg(index));
    let need = |count: usize| -> Result<(), TemplateError> {
        if args.len() < count {
            return Err(TemplateError::HelperArgument {
                helper: name.to_string(),
                message: format!("expected at least {} argument(s), got {}", count, args.len()),
                line,
            });
        }
        Ok(())
    };

    let value = match name {
        "eq" => {
            need(2)?;
            Value::Bool(loose_eq(arg(0), arg(1)))
        }
        "ne" => {
            need(2)?;
            Value::Bool(!loose_eq(arg(0), arg(1)))
        }
        "lt" | "gt" | "lte" | "gte" => {
            need(2)?;
            let ordering = compare(arg(0), arg(1));
            Value::Bool(match name {
                "lt" => ordering == Some(Ordering::Less),
                "gt" => ordering == Some(Ordering::Greater),
                "lte" => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
                _ => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            })
        }
        "and" => Value::Bool(!args.is_empty() && args.iter().all(is_truthy)),
        "or" => Value::Bool(args.iter().any(is_truthy)),
        "not" => Value::Bool(!is_truthy(arg(0))),
        "upper" => Value::String(text(0).to_uppercase()),
        "lower" => Value::String(text(0).to_lowercase()),
        "capitalize" => Value::String(capitalize(&text(0))),
        "trim" => Value::String(text(0).trim().to_string()),
        "concat" => Value::String(args.iter().map(display_value).collect()),
        "replace" => {
            need(3)?;
            let from = text(1);
            if from.is_empty() {
                Value::String(text(0))
            } else {
                Value::String(text(0).replace(&from, &text(2)))
            }
        }
        "formatDate" => {
            let format = match args.get(1) {
                Some(Value::String(format)) => format.as_str(),
                _ => env.default_date_format,
            };
            match parse_date(arg(0)) {
                Some(date) => Value::String(format_date(date, format)),
                None => Value::String(text(0)),
            }
        }
        "today" => {
            let format = match args.first() {
                Some(Value::String(format)) => format.as_str(),
                _ => env.default_date_format,
            };
            match parse_date(&Value::String("today".to_string())) {
                Some(date) => Value::String(format_date(date, format)),
                None => Value::Null,
            }
        }
        "length" => Value::from(match arg(0) {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            Value::String(s) => s.chars().count(),
            _ => 0,
        }),
        "first" => match arg(0) {
            Value::Array(items) => items.first().cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        },
        "last" => match arg(0) {
            Value::Array(items) => items.last().cloned().unwrap_or(Value::Null),
            _ => Value::Null,
        },
        "join" => {
            let separator = match args.get(1) {
                Some(Value::String(separator)) => separator.clone(),
                _ => ", ".to_string(),
            };
            match arg(0) {
                Value::Array(items) => Value::String(
                    items
                        .iter()
                        .map(display_value)
                        .collect::<Vec<_>>()
                        .join(&separator),
                ),
                other => Value::String(display_value(other)),
            }
        }
        "derived" => {
            need(2)?;
            let key = format!("{}$", text(0));
            env.root
                .get(&key)
                .and_then(|fields| resolve_key(fields, &text(1)))
                .cloned()
                .unwrap_or(Value::Null)
        }
        "pluralize" => {
            need(2)?;
            let singular = text(1);
            let count = as_number(arg(0)).unwrap_or(0.0);
            if count == 1.0 {
                Value::String(singular)
            } else {
                match args.get(2) {
                    Some(plural) => Value::String(display_value(plural)),
                    None => Value::String(format!("{}s", singular)),
                }
            }
        }
        "default" => {
            need(2)?;
            if is_empty_value(arg(0)) {
                arg(1).clone()
            } else {
                arg(0).clone()
            }
        }
        _ => {
            return Err(TemplateError::UnknownHelper {
                name: name.to_string(),
                line,
            })
        }
    };
    Ok(value)
}

/// Numbers compare numerically, anything else by text
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (as_number(a), as_number(b)) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ if a.is_null() || b.is_null() => None,
        _ => Some(display_value(a).cmp(&display_value(b))),
    }
}

/// Upper-case the first letter of every word
fn capitalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
            if c.is_whitespace() {
                at_word_start = true;
            } else if c.is_alphabetic() {
                at_word_start = false;
            }
        }
    }
    out
}
