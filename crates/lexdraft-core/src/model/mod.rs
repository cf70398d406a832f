//! Records consumed and produced by the engine

pub mod contact;
pub mod document;
pub mod profile;
pub mod template;
pub mod variable;

use std::collections::BTreeMap;

pub use contact::{Address, Attorney, Contact, Party, PartyRole, PartySide};
pub use document::{DocumentState, ValidationError, ValidationErrorKind, ValidationState};
pub use profile::{FirmInfo, ProfileDefaults, UserProfile};
pub use template::TemplateDefinition;
pub use variable::{
    CascadeRule, ConditionOperator, ConditionalRule, ValidationRule, VariableDefinition,
    VariableType,
};

/// Variable id (or dotted derived path) → value
pub type ValueMap = BTreeMap<String, serde_json::Value>;

/// Whether a raw value counts as "not filled in"
pub fn is_empty_value(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Text form used when a value is spliced into a string.
///
/// Strings are inserted as-is, null becomes empty, compound values are JSON.
pub fn display_value(value: &serde_json::Value) -> String {
    use serde_json::Value;
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty_value() {
        assert!(is_empty_value(&json!(null)));
        assert!(is_empty_value(&json!("   ")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!("x")));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!("a b")), "a b");
        assert_eq!(display_value(&json!(2.5)), "2.5");
        assert_eq!(display_value(&json!([1, 2])), "[1,2]");
    }
}
