use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::variable::VariableDefinition;
use crate::error::{LexdraftError, Result};

/// A loaded template: body source plus the variables it consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefinition {
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub name: Option<String>,
    pub body: String,
    #[serde(default)]
    pub variables: Vec<VariableDefinition>,
}

impl TemplateDefinition {
    pub fn new(id: impl Into<String>, version: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            name: None,
            body: body.into(),
            variables: Vec::new(),
        }
    }

    pub fn with_variable(mut self, variable: VariableDefinition) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let template: Self = serde_json::from_str(content)
            .map_err(|e| LexdraftError::TemplateDefinitionInvalid(e.to_string()))?;
        template.validate()?;
        Ok(template)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let template: Self = toml::from_str(content)
            .map_err(|e| LexdraftError::TemplateDefinitionInvalid(e.to_string()))?;
        template.validate()?;
        Ok(template)
    }

    /// Variable ids must be unique within a template
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for variable in &self.variables {
            if !seen.insert(variable.id.as_str()) {
                return Err(LexdraftError::DuplicateVariable(variable.id.clone()));
            }
        }
        Ok(())
    }

    pub fn variable(&self, id: &str) -> Option<&VariableDefinition> {
        self.variables.iter().find(|variable| variable.id == id)
    }
}
