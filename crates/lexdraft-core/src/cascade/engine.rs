use std::collections::{BTreeMap, HashSet};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::expr::Expression;
use super::graph::{build_dependency_graph, get_processing_order, DependencyGraph};
use crate::config::EngineConfig;
use crate::derive::{
    derive_attorney_fields, derive_contact_fields, derive_party_fields, format_party_name, FieldSet,
};
use crate::model::{Attorney, Contact, Party, ValueMap, VariableDefinition, VariableType};

/// Values and derived values a cascade starts from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeState {
    pub values: ValueMap,
    pub derived_values: ValueMap,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeResult {
    pub updated_values: ValueMap,
    pub derived_values: ValueMap,
    /// Every variable written during the cascade, origin first, no duplicates
    pub changed_variables: Vec<String>,
}

impl CascadeResult {
    pub fn into_state(self) -> CascadeState {
        CascadeState {
            values: self.updated_values,
            derived_values: self.derived_values,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    target_variable: String,
    target_field: Option<String>,
    expression: Expression,
}

/// Propagates variable changes through a template's cascade rules.
///
/// Rules are parsed once when the engine is built. Cycles and chains deeper
/// than `cascade.max_depth` are logged and the offending step is skipped.
#[derive(Debug, Clone)]
pub struct CascadeEngine {
    definitions: BTreeMap<String, VariableDefinition>,
    rules: BTreeMap<String, Vec<CompiledRule>>,
    graph: DependencyGraph,
    max_depth: usize,
    default_versus: String,
}

impl CascadeEngine {
    pub fn new(definitions: &[VariableDefinition]) -> Self {
        Self::with_config(definitions, &EngineConfig::default())
    }

    pub fn with_config(definitions: &[VariableDefinition], config: &EngineConfig) -> Self {
        let known: HashSet<&str> = definitions.iter().map(|d| d.id.as_str()).collect();
        let rules = definitions
            .iter()
            .map(|definition| {
                let compiled = definition
                    .cascades
                    .iter()
                    .map(|rule| CompiledRule {
                        target_variable: rule.target_variable.clone(),
                        target_field: rule.target_field.clone(),
                        expression: Expression::parse(&rule.expression, |id| known.contains(id)),
                    })
                    .collect();
                (definition.id.clone(), compiled)
            })
            .collect();

        Self {
            definitions: definitions
                .iter()
                .map(|d| (d.id.clone(), d.clone()))
                .collect(),
            rules,
            graph: build_dependency_graph(definitions),
            max_depth: config.cascade.max_depth,
            default_versus: config.parties.default_versus.clone(),
        }
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn definition(&self, id: &str) -> Option<&VariableDefinition> {
        self.definitions.get(id)
    }

    /// Apply one change and everything it cascades into
    pub fn process_cascades(&self, variable_id: &str, new_value: Value, state: &CascadeState) -> CascadeResult {
        let mut values = state.values.clone();
        let mut derived = state.derived_values.clone();
        let mut changed = Vec::new();
        self.cascade(
            variable_id,
            new_value,
            &mut values,
            &mut derived,
            &HashSet::new(),
            0,
            &mut changed,
        );
        CascadeResult {
            updated_values: values,
            derived_values: derived,
            changed_variables: changed,
        }
    }

    /// Remove a variable's value and its derived fields.
    ///
    /// Dependents keep the values they were last cascaded to.
    pub fn clear_value(&self, variable_id: &str, state: &CascadeState) -> CascadeResult {
        let mut values = state.values.clone();
        let mut derived = state.derived_values.clone();
        values.remove(variable_id);
        if let Some(definition) = self.definitions.get(variable_id) {
            self.derive_typed(definition, &Value::Null, &mut derived);
        }
        CascadeResult {
            updated_values: values,
            derived_values: derived,
            changed_variables: vec![variable_id.to_string()],
        }
    }

    /// Apply several simultaneous changes, upstream variables first
    pub fn process_batch_changes(&self, changes: &[(String, Value)], state: &CascadeState) -> CascadeResult {
        let mut ordered: Vec<(usize, &(String, Value))> = changes
            .iter()
            .map(|change| (get_processing_order(&self.graph, &change.0).len(), change))
            .collect();
        ordered.sort_by(|a, b| b.0.cmp(&a.0));

        let mut result = CascadeResult {
            updated_values: state.values.clone(),
            derived_values: state.derived_values.clone(),
            changed_variables: Vec::new(),
        };
        for (_, (id, value)) in ordered {
            let mut changed = Vec::new();
            self.cascade(
                id,
                value.clone(),
                &mut result.updated_values,
                &mut result.derived_values,
                &HashSet::new(),
                0,
                &mut changed,
            );
            for id in changed {
                if !result.changed_variables.contains(&id) {
                    result.changed_variables.push(id);
                }
            }
        }
        result
    }

    #[allow(clippy::too_many_arguments)]
    fn cascade(
        &self,
        variable_id: &str,
        new_value: Value,
        values: &mut ValueMap,
        derived: &mut ValueMap,
        visited: &HashSet<String>,
        depth: usize,
        changed: &mut Vec<String>,
    ) {
        if !changed.iter().any(|id| id == variable_id) {
            changed.push(variable_id.to_string());
        }
        if let Some(definition) = self.definitions.get(variable_id) {
            self.derive_typed(definition, &new_value, derived);
        }
        values.insert(variable_id.to_string(), new_value.clone());

        let Some(rules) = self.rules.get(variable_id) else {
            return;
        };

        let mut visited = visited.clone();
        visited.insert(variable_id.to_string());

        for rule in rules {
            let target = rule.target_variable.as_str();
            if visited.contains(target) {
                tracing::warn!(variable = %variable_id, target = %target, "cascade cycle detected, skipping rule");
                continue;
            }
            if depth >= self.max_depth {
                tracing::warn!(variable = %variable_id, target = %target, depth, "cascade depth limit reached, skipping rule");
                continue;
            }
            let Some(computed) = rule.expression.evaluate(&new_value, values, derived) else {
                tracing::debug!(variable = %variable_id, target = %target, "cascade expression did not resolve");
                continue;
            };
            let next = match &rule.target_field {
                Some(field) => {
                    let mut object = match values.get(target) {
                        Some(Value::Object(map)) => map.clone(),
                        _ => Map::new(),
                    };
                    object.insert(field.clone(), computed);
                    Value::Object(object)
                }
                None => computed,
            };
            if values.get(target) == Some(&next) {
                continue;
            }
            self.cascade(target, next, values, derived, &visited, depth + 1, changed);
        }
    }

    /// Recompute `"<id>.<field>"` (and `"<id>[i].<field>"`) derived values for
    /// contact, party and attorney variables
    fn derive_typed(&self, definition: &VariableDefinition, value: &Value, derived: &mut ValueMap) {
        if !definition.var_type.is_contact_family() {
            return;
        }
        let id = definition.id.as_str();
        let dotted = format!("{}.", id);
        let indexed = format!("{}[", id);
        derived.retain(|key, _| !key.starts_with(&dotted) && !key.starts_with(&indexed));

        if crate::model::is_empty_value(value) {
            return;
        }

        match definition.var_type {
            VariableType::Contact => {
                if let Some(contact) = parse_record::<Contact>(id, value) {
                    insert_fields(derived, &dotted, &derive_contact_fields(&contact));
                }
            }
            VariableType::Attorney => {
                if let Some(attorney) = parse_record::<Attorney>(id, value) {
                    insert_fields(derived, &dotted, &derive_contact_fields(&attorney.contact));
                    insert_fields(derived, &dotted, &derive_attorney_fields(&attorney));
                }
            }
            VariableType::Party => {
                let parties = match value {
                    Value::Array(_) => parse_record::<Vec<Party>>(id, value),
                    _ => parse_record::<Party>(id, value).map(|party| vec![party]),
                };
                let Some(parties) = parties else {
                    return;
                };
                let versus = definition
                    .versus_style()
                    .unwrap_or(self.default_versus.as_str());
                insert_fields(derived, &dotted, &derive_party_fields(&parties, versus));
                if value.is_array() {
                    for (index, party) in parties.iter().enumerate() {
                        insert_party(derived, &format!("{}[{}].", id, index), party);
                    }
                } else if let Some(party) = parties.first() {
                    insert_party(derived, &dotted, party);
                }
            }
            _ => {}
        }
    }
}

fn parse_record<T: DeserializeOwned>(id: &str, value: &Value) -> Option<T> {
    match serde_json::from_value(value.clone()) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::warn!(variable = %id, error = %err, "value does not match its declared type, skipping derivation");
            None
        }
    }
}

fn insert_party(derived: &mut ValueMap, prefix: &str, party: &Party) {
    insert_fields(derived, prefix, &derive_contact_fields(&party.contact));
    derived.insert(
        format!("{}partyName", prefix),
        Value::String(format_party_name(party)),
    );
}

fn insert_fields(derived: &mut ValueMap, prefix: &str, fields: &dyn FieldSet) {
    for (key, value) in fields.entries() {
        derived.insert(format!("{}{}", prefix, key), Value::String(value));
    }
}
