//! Conditional visibility rules

use serde_json::Value;

use super::validation::as_number;
use crate::model::{display_value, is_empty_value, ConditionOperator, ConditionalRule, ValueMap};

/// Whether `rule` holds against the current values.
///
/// A missing controlling value is treated as null.
pub fn evaluate_condition(rule: &ConditionalRule, values: &ValueMap) -> bool {
    let actual = values.get(&rule.depends_on).unwrap_or(&Value::Null);
    let expected = &rule.value;
    match rule.operator {
        ConditionOperator::Equals => loose_eq(actual, expected),
        ConditionOperator::NotEquals => !loose_eq(actual, expected),
        ConditionOperator::Empty => is_empty_value(actual),
        ConditionOperator::NotEmpty => !is_empty_value(actual),
        ConditionOperator::Contains => contains(actual, expected),
        ConditionOperator::NotContains => !contains(actual, expected),
        ConditionOperator::GreaterThan => compare(actual, expected).is_some_and(|(a, b)| a > b),
        ConditionOperator::LessThan => compare(actual, expected).is_some_and(|(a, b)| a < b),
        ConditionOperator::In => one_of(actual, expected),
        ConditionOperator::NotIn => !one_of(actual, expected),
    }
}

/// Deep equality, plus scalar equality by text so `"3"` equals `3`
pub(crate) fn loose_eq(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    let scalar = |v: &Value| matches!(v, Value::String(_) | Value::Number(_) | Value::Bool(_));
    scalar(a) && scalar(b) && display_value(a) == display_value(b)
}

fn contains(haystack: &Value, needle: &Value) -> bool {
    match haystack {
        Value::Array(items) => items.iter().any(|item| loose_eq(item, needle)),
        Value::String(s) => s.contains(&display_value(needle)),
        _ => false,
    }
}

fn one_of(value: &Value, list: &Value) -> bool {
    list.as_array()
        .is_some_and(|items| items.iter().any(|item| loose_eq(item, value)))
}

fn compare(a: &Value, b: &Value) -> Option<(f64, f64)> {
    Some((as_number(a)?, as_number(b)?))
}
