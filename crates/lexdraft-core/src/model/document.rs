use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValueMap;

/// Per-document state owned by one variable engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentState {
    pub template_id: String,
    pub template_version: String,
    #[serde(default)]
    pub values: ValueMap,
    #[serde(default)]
    pub derived_values: ValueMap,
    #[serde(default)]
    pub validation: ValidationState,
    pub last_modified: DateTime<Utc>,
}

impl DocumentState {
    pub fn new(template_id: impl Into<String>, template_version: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            template_version: template_version.into(),
            values: ValueMap::new(),
            derived_values: ValueMap::new(),
            validation: ValidationState::default(),
            last_modified: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationState {
    pub is_valid: bool,
    #[serde(default)]
    pub errors: Vec<ValidationError>,
}

impl Default for ValidationState {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }
}

impl ValidationState {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn errors_for<'a>(&'a self, variable_id: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors
            .iter()
            .filter(move |error| error.variable_id == variable_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorKind {
    Required,
    MinLength,
    MaxLength,
    Pattern,
    Email,
    Phone,
    InvalidContact,
    InvalidNumber,
    OutOfRange,
    InvalidOption,
}

/// A user-correctable problem with one variable's value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub variable_id: String,
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        variable_id: impl Into<String>,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            variable_id: variable_id.into(),
            kind,
            message: message.into(),
        }
    }
}
