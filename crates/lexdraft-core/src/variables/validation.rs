//! Data validation of variable values
//!
//! Problems are returned as [`ValidationError`] records; nothing here fails.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::regex_cache::RegexCache;
use crate::model::{
    display_value, is_empty_value, Contact, ValidationError, ValidationErrorKind, ValidationRule,
    VariableDefinition, VariableType,
};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

const MIN_PHONE_DIGITS: usize = 7;

/// Validate one visible variable.
///
/// A required variable without a value yields a single `Required` error and
/// nothing else. Empty optional variables are not checked further.
pub fn validate_variable(
    definition: &VariableDefinition,
    value: Option<&Value>,
    regexes: &mut RegexCache,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let value = match value {
        Some(value) if !is_empty_value(value) => value,
        _ => {
            if definition.required {
                errors.push(error(
                    definition,
                    ValidationErrorKind::Required,
                    None,
                    format!("{} is required", definition.display_name()),
                ));
            }
            return errors;
        }
    };

    for rule in &definition.validation {
        if let Some(err) = check_rule(definition, rule, value, regexes) {
            errors.push(err);
        }
    }
    errors.extend(check_type(definition, value));
    errors
}

fn check_rule(
    definition: &VariableDefinition,
    rule: &ValidationRule,
    value: &Value,
    regexes: &mut RegexCache,
) -> Option<ValidationError> {
    let name = definition.display_name();
    let text = display_value(value);
    let length = match value {
        Value::Array(items) => items.len(),
        _ => text.chars().count(),
    };

    let (kind, fallback) = match rule {
        ValidationRule::MinLength { value: min, .. } if length < *min => (
            ValidationErrorKind::MinLength,
            format!("{} must be at least {} characters", name, min),
        ),
        ValidationRule::MaxLength { value: max, .. } if length > *max => (
            ValidationErrorKind::MaxLength,
            format!("{} must be at most {} characters", name, max),
        ),
        ValidationRule::Pattern { value: pattern, .. } if !regexes.is_match(pattern, &text) => (
            ValidationErrorKind::Pattern,
            format!("{} has an invalid format", name),
        ),
        ValidationRule::Email { .. } if !is_email(&text) => (
            ValidationErrorKind::Email,
            format!("{} must be a valid email address", name),
        ),
        ValidationRule::Phone { .. } if !is_phone(&text) => (
            ValidationErrorKind::Phone,
            format!("{} must be a valid phone number", name),
        ),
        _ => return None,
    };
    Some(error(definition, kind, rule.message(), fallback))
}

fn check_type(definition: &VariableDefinition, value: &Value) -> Option<ValidationError> {
    let name = definition.display_name();
    match definition.var_type {
        ty if ty.is_contact_family() => {
            let records: Vec<&Value> = match value {
                Value::Array(items) => items.iter().collect(),
                other => vec![other],
            };
            let valid = records.into_iter().all(|record| {
                serde_json::from_value::<Contact>(record.clone()).is_ok_and(|contact| contact.is_valid())
            });
            (!valid).then(|| {
                error(
                    definition,
                    ValidationErrorKind::InvalidContact,
                    None,
                    format!("{} needs a first name, last name or company", name),
                )
            })
        }
        VariableType::Number => {
            let Some(number) = as_number(value) else {
                return Some(error(
                    definition,
                    ValidationErrorKind::InvalidNumber,
                    None,
                    format!("{} must be a number", name),
                ));
            };
            let below = definition.min().is_some_and(|min| number < min);
            let above = definition.max().is_some_and(|max| number > max);
            (below || above).then(|| {
                error(
                    definition,
                    ValidationErrorKind::OutOfRange,
                    None,
                    range_message(name, definition.min(), definition.max()),
                )
            })
        }
        VariableType::Select => {
            let options = definition.options();
            if options.is_empty() {
                return None;
            }
            let chosen: Vec<&Value> = match value {
                Value::Array(items) => items.iter().collect(),
                other => vec![other],
            };
            let valid = chosen.iter().all(|choice| options.contains(choice));
            (!valid).then(|| {
                error(
                    definition,
                    ValidationErrorKind::InvalidOption,
                    None,
                    format!("{} must be one of the listed options", name),
                )
            })
        }
        _ => None,
    }
}

fn error(
    definition: &VariableDefinition,
    kind: ValidationErrorKind,
    custom: Option<&str>,
    fallback: String,
) -> ValidationError {
    let message = custom.map(str::to_string).unwrap_or(fallback);
    ValidationError::new(definition.id.clone(), kind, message)
}

/// Finite number, from a JSON number or a numeric string
pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn range_message(name: &str, min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{} must be between {} and {}", name, min, max),
        (Some(min), None) => format!("{} must be at least {}", name, min),
        (None, Some(max)) => format!("{} must be at most {}", name, max),
        (None, None) => format!("{} is out of range", name),
    }
}

pub fn is_email(text: &str) -> bool {
    EMAIL.is_match(text.trim())
}

/// Digits and `+ - ( ) .` separators, with at least seven digits
pub fn is_phone(text: &str) -> bool {
    let text = text.trim();
    let allowed = text
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')' | '.'));
    allowed && text.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cache() -> RegexCache {
        RegexCache::new(10, 200)
    }

    fn kinds(errors: &[ValidationError]) -> Vec<ValidationErrorKind> {
        errors.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_required_short_circuits() {
        let def = VariableDefinition::new("name", VariableType::Text)
            .required()
            .with_rule(ValidationRule::MinLength { value: 3, message: None });
        let errors = validate_variable(&def, Some(&json!("  ")), &mut cache());
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::Required]);
        assert_eq!(errors[0].message, "name is required");
        assert!(validate_variable(&def, None, &mut cache()).len() == 1);
    }

    #[test]
    fn test_optional_empty_is_not_checked() {
        let def = VariableDefinition::new("email", VariableType::Text)
            .with_rule(ValidationRule::Email { message: None });
        assert!(validate_variable(&def, None, &mut cache()).is_empty());
    }

    #[test]
    fn test_length_rules_and_custom_message() {
        let def = VariableDefinition::new("code", VariableType::Text)
            .with_rule(ValidationRule::MinLength { value: 3, message: Some("Too short".into()) })
            .with_rule(ValidationRule::MaxLength { value: 4, message: None });
        let errors = validate_variable(&def, Some(&json!("ab")), &mut cache());
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::MinLength]);
        assert_eq!(errors[0].message, "Too short");
        let errors = validate_variable(&def, Some(&json!("abcde")), &mut cache());
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::MaxLength]);
    }

    #[test]
    fn test_pattern_rule() {
        let def = VariableDefinition::new("zip", VariableType::Text).with_rule(ValidationRule::Pattern {
            value: r"^\d{5}$".into(),
            message: None,
        });
        assert!(validate_variable(&def, Some(&json!("89501")), &mut cache()).is_empty());
        assert_eq!(
            kinds(&validate_variable(&def, Some(&json!("8950")), &mut cache())),
            vec![ValidationErrorKind::Pattern]
        );
    }

    #[test]
    fn test_unsafe_pattern_is_not_evaluated() {
        let def = VariableDefinition::new("x", VariableType::Text).with_rule(ValidationRule::Pattern {
            value: "(a+)+$".into(),
            message: None,
        });
        let mut regexes = cache();
        let errors = validate_variable(&def, Some(&json!("aaaa")), &mut regexes);
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::Pattern]);
        assert!(regexes.is_empty());
    }

    #[test]
    fn test_email_and_phone() {
        assert!(is_email("ann@example.com"));
        assert!(!is_email("ann@example"));
        assert!(!is_email("ann lee@example.com"));
        assert!(is_phone("(555) 010-2000"));
        assert!(is_phone("+1 555.010.2000"));
        assert!(!is_phone("555-01"));
        assert!(!is_phone("call 5550102000"));
    }

    #[test]
    fn test_contact_validity() {
        let def = VariableDefinition::new("client", VariableType::Contact);
        assert!(validate_variable(&def, Some(&json!({ "company": "Acme" })), &mut cache()).is_empty());
        assert_eq!(
            kinds(&validate_variable(&def, Some(&json!({ "email": "a@b.co" })), &mut cache())),
            vec![ValidationErrorKind::InvalidContact]
        );
        let parties = VariableDefinition::new("parties", VariableType::Party);
        let value = json!([{ "lastName": "Doe", "role": "plaintiff" }, { "role": "defendant" }]);
        assert_eq!(
            kinds(&validate_variable(&parties, Some(&value), &mut cache())),
            vec![ValidationErrorKind::InvalidContact]
        );
    }

    #[test]
    fn test_number_bounds() {
        let def = VariableDefinition::new("amount", VariableType::Number)
            .with_config("min", json!(0))
            .with_config("max", json!(100));
        assert!(validate_variable(&def, Some(&json!(50)), &mut cache()).is_empty());
        assert!(validate_variable(&def, Some(&json!("75.5")), &mut cache()).is_empty());
        let errors = validate_variable(&def, Some(&json!(101)), &mut cache());
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::OutOfRange]);
        assert_eq!(errors[0].message, "amount must be between 0 and 100");
        assert_eq!(
            kinds(&validate_variable(&def, Some(&json!("lots")), &mut cache())),
            vec![ValidationErrorKind::InvalidNumber]
        );
    }

    #[test]
    fn test_select_options() {
        let def = VariableDefinition::new("court", VariableType::Select)
            .with_config("options", json!(["superior", { "value": "federal" }]));
        assert!(validate_variable(&def, Some(&json!("federal")), &mut cache()).is_empty());
        assert_eq!(
            kinds(&validate_variable(&def, Some(&json!("traffic")), &mut cache())),
            vec![ValidationErrorKind::InvalidOption]
        );
    }
}
