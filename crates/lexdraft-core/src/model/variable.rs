use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Semantic type of a template variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariableType {
    Text,
    Textarea,
    Number,
    Date,
    Select,
    Boolean,
    Contact,
    Party,
    Attorney,
    Letterhead,
    Signature,
}

impl VariableType {
    /// Types whose values are contact-shaped records
    pub fn is_contact_family(self) -> bool {
        matches!(
            self,
            VariableType::Contact | VariableType::Party | VariableType::Attorney
        )
    }
}

/// Declarative validation rule attached to a variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ValidationRule {
    MinLength {
        value: usize,
        #[serde(default)]
        message: Option<String>,
    },
    MaxLength {
        value: usize,
        #[serde(default)]
        message: Option<String>,
    },
    Pattern {
        value: String,
        #[serde(default)]
        message: Option<String>,
    },
    Email {
        #[serde(default)]
        message: Option<String>,
    },
    Phone {
        #[serde(default)]
        message: Option<String>,
    },
}

impl ValidationRule {
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationRule::MinLength { message, .. }
            | ValidationRule::MaxLength { message, .. }
            | ValidationRule::Pattern { message, .. }
            | ValidationRule::Email { message }
            | ValidationRule::Phone { message } => message.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Empty,
    NotEmpty,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    In,
    NotIn,
}

/// Visibility rule: the variable is shown only while the condition holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    pub depends_on: String,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: Value,
}

/// Recompute `target_variable` (or one of its fields) whenever the owner changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeRule {
    pub target_variable: String,
    #[serde(default)]
    pub target_field: Option<String>,
    pub expression: String,
}

/// Template author's declaration of one variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub var_type: VariableType,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub validation: Vec<ValidationRule>,
    #[serde(default)]
    pub conditional: Option<ConditionalRule>,
    #[serde(default)]
    pub cascades: Vec<CascadeRule>,
    /// Type-specific settings (`min`, `max`, `options`, `versusStyle`, ...)
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl VariableDefinition {
    pub fn new(id: impl Into<String>, var_type: VariableType) -> Self {
        Self {
            id: id.into(),
            var_type,
            label: None,
            required: false,
            default_value: None,
            validation: Vec::new(),
            conditional: None,
            cascades: Vec::new(),
            config: Map::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation.push(rule);
        self
    }

    pub fn with_conditional(mut self, rule: ConditionalRule) -> Self {
        self.conditional = Some(rule);
        self
    }

    pub fn with_cascade(
        mut self,
        target_variable: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        self.cascades.push(CascadeRule {
            target_variable: target_variable.into(),
            target_field: None,
            expression: expression.into(),
        });
        self
    }

    pub fn with_config(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }

    /// Human-readable name used in validation messages
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    pub fn min(&self) -> Option<f64> {
        self.config.get("min").and_then(Value::as_f64)
    }

    pub fn max(&self) -> Option<f64> {
        self.config.get("max").and_then(Value::as_f64)
    }

    /// Allowed values of a select variable (plain strings or `{ "value": ... }` objects)
    pub fn options(&self) -> Vec<Value> {
        self.config
            .get("options")
            .and_then(Value::as_array)
            .map(|options| {
                options
                    .iter()
                    .map(|option| option.get("value").cloned().unwrap_or_else(|| option.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn versus_style(&self) -> Option<&str> {
        self.config.get("versusStyle").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_definition_from_json() {
        let def: VariableDefinition = serde_json::from_value(json!({
            "id": "amount",
            "type": "number",
            "required": true,
            "validation": [{ "type": "minLength", "value": 1 }],
            "cascades": [{ "targetVariable": "summary", "expression": "Amount: {{amount}}" }],
            "config": { "min": 0, "max": 100 }
        }))
        .unwrap();
        assert_eq!(def.var_type, VariableType::Number);
        assert!(def.required);
        assert_eq!(def.min(), Some(0.0));
        assert_eq!(def.max(), Some(100.0));
        assert_eq!(def.cascades[0].target_variable, "summary");
        assert!(matches!(
            def.validation[0],
            ValidationRule::MinLength { value: 1, .. }
        ));
    }

    #[test]
    fn test_select_options_accept_objects() {
        let def = VariableDefinition::new("court", VariableType::Select).with_config(
            "options",
            json!(["superior", { "value": "federal", "label": "Federal" }]),
        );
        assert_eq!(def.options(), vec![json!("superior"), json!("federal")]);
    }
}
