use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value};

use super::defaults::resolve_default;
use super::regex_cache::RegexCache;
use super::validation::validate_variable;
use super::visibility::evaluate_condition;
use crate::cascade::{CascadeEngine, CascadeResult, CascadeState};
use crate::config::EngineConfig;
use crate::derive::{derive_attorney_fields, derive_contact_fields, FieldSet};
use crate::model::{
    DocumentState, TemplateDefinition, UserProfile, ValidationState, ValueMap, VariableDefinition,
};

/// Outcome of a mutating call, reported back to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableEngineResult {
    pub success: bool,
    pub values: ValueMap,
    pub derived: ValueMap,
    pub validation: ValidationState,
    pub changed_variables: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Owns the state of one open document.
///
/// Every mutation cascades, revalidates from scratch and bumps `last_modified`.
#[derive(Debug)]
pub struct VariableEngine {
    definitions: Vec<VariableDefinition>,
    profile: Option<UserProfile>,
    cascade: CascadeEngine,
    state: DocumentState,
    regexes: RegexCache,
}

impl VariableEngine {
    pub fn new(
        template: &TemplateDefinition,
        profile: Option<UserProfile>,
        initial: Option<DocumentState>,
    ) -> Self {
        Self::new_with_config(template, profile, initial, &EngineConfig::default())
    }

    pub fn new_with_config(
        template: &TemplateDefinition,
        profile: Option<UserProfile>,
        initial: Option<DocumentState>,
        config: &EngineConfig,
    ) -> Self {
        let mut state = DocumentState::new(&template.id, &template.version);
        if let Some(initial) = initial {
            state.values = initial.values;
            state.derived_values = initial.derived_values;
        }

        let mut engine = Self {
            definitions: template.variables.clone(),
            profile,
            cascade: CascadeEngine::with_config(&template.variables, config),
            state,
            regexes: RegexCache::new(
                config.validation.regex_cache_size,
                config.validation.max_pattern_length,
            ),
        };
        engine.apply_defaults(today());
        engine.initial_cascade();
        engine.revalidate();
        engine
    }

    fn apply_defaults(&mut self, today: NaiveDate) {
        for definition in &self.definitions {
            let missing = self
                .state
                .values
                .get(&definition.id)
                .map_or(true, Value::is_null);
            if !missing {
                continue;
            }
            if let Some(value) = resolve_default(definition, self.profile.as_ref(), today) {
                tracing::debug!(variable = %definition.id, "applied default value");
                self.state.values.insert(definition.id.clone(), value);
            }
        }
    }

    fn initial_cascade(&mut self) {
        for definition in &self.definitions {
            let Some(value) = self.state.values.get(&definition.id).cloned() else {
                continue;
            };
            let result = self
                .cascade
                .process_cascades(&definition.id, value, &self.cascade_state());
            self.state.values = result.updated_values;
            self.state.derived_values = result.derived_values;
        }
    }

    fn cascade_state(&self) -> CascadeState {
        CascadeState {
            values: self.state.values.clone(),
            derived_values: self.state.derived_values.clone(),
        }
    }

    pub fn set_value(&mut self, variable_id: &str, value: Value) -> VariableEngineResult {
        if self.definition(variable_id).is_none() {
            return self.failure(format!("Unknown variable: {}", variable_id));
        }
        let result = self
            .cascade
            .process_cascades(variable_id, value, &self.cascade_state());
        self.commit(result)
    }

    /// Apply several edits as one batch.
    ///
    /// Nothing is applied when any id is unknown.
    pub fn set_values(&mut self, changes: impl IntoIterator<Item = (String, Value)>) -> VariableEngineResult {
        let changes: Vec<(String, Value)> = changes.into_iter().collect();
        let unknown: Vec<&str> = changes
            .iter()
            .map(|(id, _)| id.as_str())
            .filter(|id| self.definition(id).is_none())
            .collect();
        if !unknown.is_empty() {
            return self.failure(format!("Unknown variables: {}", unknown.join(", ")));
        }
        let result = self
            .cascade
            .process_batch_changes(&changes, &self.cascade_state());
        self.commit(result)
    }

    /// Put a variable back to its default, or clear it when it has none.
    ///
    /// A default cascades like any other edit. Clearing only drops the value
    /// and its derived fields; cascade targets keep their current values.
    pub fn reset_value(&mut self, variable_id: &str) -> VariableEngineResult {
        let Some(definition) = self.definition(variable_id) else {
            return self.failure(format!("Unknown variable: {}", variable_id));
        };
        let state = self.cascade_state();
        let result = match resolve_default(definition, self.profile.as_ref(), today()) {
            Some(default) => self.cascade.process_cascades(variable_id, default, &state),
            None => self.cascade.clear_value(variable_id, &state),
        };
        self.commit(result)
    }

    fn commit(&mut self, result: CascadeResult) -> VariableEngineResult {
        self.state.values = result.updated_values;
        self.state.derived_values = result.derived_values;
        self.revalidate();
        VariableEngineResult {
            success: true,
            values: self.state.values.clone(),
            derived: self.state.derived_values.clone(),
            validation: self.state.validation.clone(),
            changed_variables: result.changed_variables,
            error: None,
        }
    }

    fn failure(&self, message: String) -> VariableEngineResult {
        tracing::warn!(error = %message, "rejected variable update");
        VariableEngineResult {
            success: false,
            values: self.state.values.clone(),
            derived: self.state.derived_values.clone(),
            validation: self.state.validation.clone(),
            changed_variables: Vec::new(),
            error: Some(message),
        }
    }

    fn revalidate(&mut self) {
        let mut errors = Vec::new();
        for definition in &self.definitions {
            if !self.is_visible(definition) {
                continue;
            }
            errors.extend(validate_variable(
                definition,
                self.state.values.get(&definition.id),
                &mut self.regexes,
            ));
        }
        self.state.validation = ValidationState::from_errors(errors);
        self.state.touch();
    }

    fn is_visible(&self, definition: &VariableDefinition) -> bool {
        definition
            .conditional
            .as_ref()
            .map_or(true, |rule| evaluate_condition(rule, &self.state.values))
    }

    pub fn definition(&self, variable_id: &str) -> Option<&VariableDefinition> {
        self.definitions.iter().find(|d| d.id == variable_id)
    }

    pub fn definitions(&self) -> &[VariableDefinition] {
        &self.definitions
    }

    pub fn get_value(&self, variable_id: &str) -> Option<&Value> {
        self.state.values.get(variable_id)
    }

    /// Derived value by dotted path, e.g. `"recipient.salutation"`
    pub fn get_derived_value(&self, path: &str) -> Option<&Value> {
        self.state.derived_values.get(path)
    }

    pub fn get_all_values(&self) -> &ValueMap {
        &self.state.values
    }

    pub fn get_all_derived_values(&self) -> &ValueMap {
        &self.state.derived_values
    }

    /// Unknown variables are never visible
    pub fn is_variable_visible(&self, variable_id: &str) -> bool {
        self.definition(variable_id)
            .is_some_and(|definition| self.is_visible(definition))
    }

    pub fn get_visible_variables(&self) -> Vec<&VariableDefinition> {
        self.definitions
            .iter()
            .filter(|definition| self.is_visible(definition))
            .collect()
    }

    pub fn get_validation_state(&self) -> &ValidationState {
        &self.state.validation
    }

    pub fn is_complete(&self) -> bool {
        self.state.validation.is_valid
    }

    pub fn get_state(&self) -> DocumentState {
        self.state.clone()
    }

    /// Context handed to the template renderer.
    ///
    /// Raw values by id, derived fields under `"<id>$"` (indexed entries under
    /// `"<id>$".items`), and `author`/`firm`/`defaults` when a profile is set.
    pub fn get_template_context(&self) -> Value {
        let mut context = Map::new();

        if let Some(profile) = &self.profile {
            if let Some(attorney) = &profile.attorney {
                let mut author = match serde_json::to_value(attorney) {
                    Ok(Value::Object(map)) => map,
                    _ => Map::new(),
                };
                insert_all(&mut author, &derive_contact_fields(&attorney.contact));
                insert_all(&mut author, &derive_attorney_fields(attorney));
                context.insert("author".to_string(), Value::Object(author));
            }
            if let Some(firm) = &profile.firm {
                if let Ok(value) = serde_json::to_value(firm) {
                    context.insert("firm".to_string(), value);
                }
            }
            if let Ok(value) = serde_json::to_value(&profile.defaults) {
                context.insert("defaults".to_string(), value);
            }
        }

        for (id, value) in &self.state.values {
            context.insert(id.clone(), value.clone());
        }

        for (key, value) in &self.state.derived_values {
            insert_derived(&mut context, key, value.clone());
        }

        Value::Object(context)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn insert_all(target: &mut Map<String, Value>, fields: &dyn FieldSet) {
    for (key, value) in fields.entries() {
        target.insert(key.to_string(), Value::String(value));
    }
}

/// Place `"id.field"` at `context["id$"].field` and `"id[i].field"` at
/// `context["id$"].items[i].field`.
///
/// Indexed keys must point inside the raw array value of `id`.
fn insert_derived(context: &mut Map<String, Value>, key: &str, value: Value) {
    let Some(split) = key.find(['.', '[']) else {
        return;
    };
    let (id, rest) = key.split_at(split);
    let item_count = context.get(id).and_then(Value::as_array).map_or(0, Vec::len);
    let entry = context
        .entry(format!("{}$", id))
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(fields) = entry else {
        return;
    };

    if let Some(field) = rest.strip_prefix('.') {
        fields.insert(field.to_string(), value);
        return;
    }

    let Some((index, field)) = rest[1..].split_once("].") else {
        return;
    };
    let Ok(index) = index.parse::<usize>() else {
        return;
    };
    if index >= item_count {
        tracing::debug!(key = %key, items = item_count, "derived index outside its array, skipping");
        return;
    }
    let items = fields
        .entry("items".to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    let Value::Array(items) = items else {
        return;
    };
    if items.len() <= index {
        items.resize(index + 1, Value::Object(Map::new()));
    }
    if let Value::Object(item) = &mut items[index] {
        item.insert(field.to_string(), value);
    }
}
