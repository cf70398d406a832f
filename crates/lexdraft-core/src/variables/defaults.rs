//! Initial values for variables the document has not filled in yet

use chrono::NaiveDate;
use serde_json::Value;

use crate::model::{UserProfile, VariableDefinition, VariableType};

/// Template default value that stands for the current date
pub const TODAY: &str = "today";

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Value the signed-in user's profile supplies for `definition`, if any
pub fn profile_default(definition: &VariableDefinition, profile: &UserProfile, today: NaiveDate) -> Option<Value> {
    match definition.var_type {
        VariableType::Attorney => profile
            .attorney
            .as_ref()
            .and_then(|attorney| serde_json::to_value(attorney).ok()),
        VariableType::Letterhead => profile.defaults.letterhead_id.clone().map(Value::String),
        VariableType::Signature => profile.defaults.signature_id.clone().map(Value::String),
        VariableType::Date if profile.defaults.auto_date => Some(Value::String(format_iso_date(today))),
        _ => None,
    }
}

/// Profile default first, then the template's own default value
pub fn resolve_default(
    definition: &VariableDefinition,
    profile: Option<&UserProfile>,
    today: NaiveDate,
) -> Option<Value> {
    if let Some(value) = profile.and_then(|profile| profile_default(definition, profile, today)) {
        return Some(value);
    }
    match &definition.default_value {
        Some(Value::String(s)) if s.eq_ignore_ascii_case(TODAY) => Some(Value::String(format_iso_date(today))),
        Some(Value::Null) | None => None,
        Some(value) => Some(value.clone()),
    }
}
