//! End-to-end: template definition → variable engine → rendered document

use lexdraft_core::model::{TemplateDefinition, UserProfile, ValidationErrorKind};
use lexdraft_core::template::TemplateRenderer;
use lexdraft_core::variables::VariableEngine;
use lexdraft_testkit::fixtures;
use serde_json::json;

fn demand_letter() -> TemplateDefinition {
    serde_json::from_value(fixtures::demand_letter_template()).unwrap()
}

fn profile() -> UserProfile {
    serde_json::from_value(fixtures::user_profile()).unwrap()
}

#[test]
fn test_new_document_reports_missing_required_values() {
    let engine = VariableEngine::new(&demand_letter(), None, None);

    assert_eq!(engine.get_value("subject"), Some(&json!("Outstanding balance")));
    assert_eq!(engine.get_value("includeDeadline"), Some(&json!(false)));
    assert!(!engine.is_complete());

    let errors = &engine.get_validation_state().errors;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].variable_id, "recipient");
    assert_eq!(errors[0].kind, ValidationErrorKind::Required);
    assert_eq!(errors[0].message, "Recipient is required");
}

#[test]
fn test_setting_contact_cascades_and_derives() {
    let mut engine = VariableEngine::new(&demand_letter(), None, None);
    let result = engine.set_value("recipient", fixtures::ann_lee());

    assert!(result.success);
    assert!(result.changed_variables.contains(&"recipient".to_string()));
    assert!(result.changed_variables.contains(&"recipientName".to_string()));
    assert_eq!(engine.get_value("recipientName"), Some(&json!("Ann Lee")));
    assert_eq!(
        engine.get_derived_value("recipient.salutation"),
        Some(&json!("Dear Ann Lee:"))
    );
    assert!(engine.is_complete());
}

#[test]
fn test_conditional_variable_only_validated_when_visible() {
    let mut engine = VariableEngine::new(&demand_letter(), None, None);
    engine.set_value("recipient", fixtures::ann_lee());
    assert!(!engine.is_variable_visible("deadline"));
    assert!(engine.is_complete());

    engine.set_value("includeDeadline", json!(true));
    assert!(engine.is_variable_visible("deadline"));
    assert!(!engine.is_complete());
    let errors: Vec<_> = engine
        .get_validation_state()
        .errors_for("deadline")
        .map(|error| error.message.clone())
        .collect();
    assert_eq!(errors, vec!["deadline is required".to_string()]);

    engine.set_value("deadline", json!("2026-04-01"));
    assert!(engine.is_complete());
}

#[test]
fn test_number_range_message() {
    let mut engine = VariableEngine::new(&demand_letter(), None, None);
    engine.set_value("recipient", fixtures::ann_lee());
    let result = engine.set_value("amount", json!(-5));
    let error = result
        .validation
        .errors
        .iter()
        .find(|error| error.variable_id == "amount")
        .expect("amount error");
    assert_eq!(error.kind, ValidationErrorKind::OutOfRange);
    assert_eq!(error.message, "Amount must be between 0 and 1000000");
}

#[test]
fn test_unknown_variable_is_rejected() {
    let mut engine = VariableEngine::new(&demand_letter(), None, None);
    let before = engine.get_all_values().clone();
    let result = engine.set_value("nope", json!(1));
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Unknown variable: nope"));
    assert_eq!(engine.get_all_values(), &before);
}

#[test]
fn test_profile_fills_dates_and_author() {
    let engine = VariableEngine::new(&demand_letter(), Some(profile()), None);
    let letter_date = engine.get_value("letterDate").and_then(|v| v.as_str()).unwrap();
    assert_eq!(letter_date.len(), 10);
    assert!(chrono::NaiveDate::parse_from_str(letter_date, "%Y-%m-%d").is_ok());

    let context = engine.get_template_context();
    assert_eq!(context["author"]["barNumberLine"], json!("CA Bar No. 123456"));
    assert_eq!(context["author"]["fullNameWithSuffix"], json!("Dana Park, Esq."));
    assert_eq!(context["firm"]["name"], json!("Park & Lee LLP"));
    assert_eq!(context["defaults"]["letterheadId"], json!("lh-standard"));
}

#[test]
fn test_render_demand_letter() {
    let template = demand_letter();
    let mut engine = VariableEngine::new(&template, None, None);
    engine.set_values(vec![
        ("recipient".to_string(), fixtures::jane_doe()),
        ("amount".to_string(), json!(1250)),
        ("includeDeadline".to_string(), json!(true)),
        ("deadline".to_string(), json!("2026-04-01")),
    ]);
    assert!(engine.is_complete());

    let mut renderer = TemplateRenderer::new();
    let result = renderer.render(&template, &engine.get_template_context());
    assert!(result.success, "{:?}", result.errors);
    assert_eq!(
        result.content,
        "Dear Ms. Doe:\n\nRe: Outstanding balance\n\nAmount due: 1250\nPay by April 1, 2026."
    );
    assert_eq!(
        result.content_controls,
        vec!["recipient$.salutation", "subject", "amount", "includeDeadline", "deadline"]
    );
}

#[test]
fn test_render_caption_from_party_list() {
    let template: TemplateDefinition = serde_json::from_value(fixtures::caption_template()).unwrap();
    let mut engine = VariableEngine::new(&template, None, None);
    engine.set_value("parties", fixtures::caption_parties());

    let mut renderer = TemplateRenderer::new();
    let result = renderer.render(&template, &engine.get_template_context());
    assert!(result.success, "{:?}", result.errors);
    assert_eq!(
        result.content,
        "JANE DOE, et al., Plaintiffs,\nvs.\nACME, INC., Defendant."
    );
}

#[test]
fn test_party_items_are_iterable_in_templates() {
    let template: TemplateDefinition = serde_json::from_value(fixtures::caption_template()).unwrap();
    let mut engine = VariableEngine::new(&template, None, None);
    engine.set_value("parties", fixtures::caption_parties());

    let body = TemplateDefinition::new(
        "service",
        "1",
        "{{#each parties$.items |p|}}{{@index}}. {{p.partyName}}\n{{/each}}",
    );
    let mut renderer = TemplateRenderer::new();
    let result = renderer.render(&body, &engine.get_template_context());
    assert_eq!(result.content, "0. Jane Doe\n1. John Roe\n2. Acme, Inc.\n");
}

#[test]
fn test_state_round_trip_restores_document() {
    let template = demand_letter();
    let mut engine = VariableEngine::new(&template, None, None);
    engine.set_value("recipient", fixtures::ann_lee());
    let saved = serde_json::to_string(&engine.get_state()).unwrap();

    let restored = VariableEngine::new(&template, None, Some(serde_json::from_str(&saved).unwrap()));
    assert_eq!(restored.get_value("recipientName"), Some(&json!("Ann Lee")));
    assert_eq!(
        restored.get_derived_value("recipient.salutation"),
        Some(&json!("Dear Ann Lee:"))
    );
    assert!(restored.is_complete());
}
