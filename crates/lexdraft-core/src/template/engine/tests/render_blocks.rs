//! Conditional, loop and scope blocks

use super::helpers::{matter_context, simple_context};
use super::*;

#[test]
fn test_if_else() {
    let context = simple_context();
    assert_eq!(render("{{#if urgent}}URGENT{{/if}}", &context).unwrap(), "URGENT");
    assert_eq!(
        render("{{#if empty}}has{{else}}none{{/if}}", &context).unwrap(),
        "none"
    );
    assert_eq!(render("{{#if missing}}x{{/if}}", &context).unwrap(), "");
}

#[test]
fn test_unless() {
    let context = simple_context();
    assert_eq!(
        render("{{#unless urgent}}routine{{else}}rush{{/unless}}", &context).unwrap(),
        "rush"
    );
    assert_eq!(render("{{#unless empty}}blank{{/unless}}", &context).unwrap(), "blank");
}

#[test]
fn test_if_with_subexpression() {
    let context = simple_context();
    assert_eq!(
        render("{{#if (eq count 3)}}three{{else}}other{{/if}}", &context).unwrap(),
        "three"
    );
    assert_eq!(
        render("{{#if (gt amount 5000)}}large{{else}}small{{/if}}", &context).unwrap(),
        "small"
    );
}

#[test]
fn test_each_over_array_with_this() {
    let context = matter_context();
    assert_eq!(
        render("{{#each claims}}[{{this}}]{{/each}}", &context).unwrap(),
        "[breach of contract][fraud]"
    );
}

#[test]
fn test_each_with_binding_and_data_variables() {
    let context = matter_context();
    let template = "{{#each parties |p|}}{{@index}}:{{p.name}}{{#unless @last}}; {{/unless}}{{/each}}";
    assert_eq!(render(template, &context).unwrap(), "0:Jane Doe; 1:Acme, Inc.");
}

#[test]
fn test_each_first_flag() {
    let context = matter_context();
    let template = "{{#each claims}}{{#if @first}}First: {{else}}, {{/if}}{{this}}{{/each}}";
    assert_eq!(
        render(template, &context).unwrap(),
        "First: breach of contract, fraud"
    );
}

#[test]
fn test_each_over_object() {
    let context = matter_context();
    assert_eq!(
        render("{{#each fees}}{{@key}}={{this}} {{/each}}", &context).unwrap(),
        "filing=435 service=75 "
    );
}

#[test]
fn test_each_empty_renders_else() {
    let context = serde_json::json!({ "items": [] });
    assert_eq!(
        render("{{#each items}}x{{else}}none{{/each}}", &context).unwrap(),
        "none"
    );
    assert_eq!(render("{{#each missing}}x{{else}}none{{/each}}", &context).unwrap(), "none");
}

#[test]
fn test_each_reads_outer_scope() {
    let context = matter_context();
    assert_eq!(
        render("{{#each parties}}{{name}} ({{caseNumber}}) {{/each}}", &context).unwrap(),
        "Jane Doe (CV-2026-0142) Acme, Inc. (CV-2026-0142) "
    );
}

#[test]
fn test_nested_each() {
    let context = serde_json::json!({
        "counts": [
            { "title": "Count I", "elements": ["duty", "breach"] },
            { "title": "Count II", "elements": ["reliance"] }
        ]
    });
    let template = "{{#each counts |c|}}{{c.title}}:{{#each c.elements}} {{this}}{{/each}}.{{/each}}";
    assert_eq!(
        render(template, &context).unwrap(),
        "Count I: duty breach.Count II: reliance."
    );
}

#[test]
fn test_with_block() {
    let context = matter_context();
    assert_eq!(
        render("{{#with client.address}}{{city}}, {{state}}{{/with}}", &context).unwrap(),
        "Reno, NV"
    );
    assert_eq!(
        render("{{#with client.phone}}{{this}}{{else}}no phone{{/with}}", &context).unwrap(),
        "no phone"
    );
}

#[test]
fn test_with_binding() {
    let context = matter_context();
    assert_eq!(
        render("{{#with client |c|}}{{c.name}} in {{c.address.city}}{{/with}}", &context).unwrap(),
        "Jane Doe in Reno"
    );
}

#[test]
fn test_non_iterable_each_is_error() {
    let context = simple_context();
    let err = render("{{#each title}}x{{/each}}", &context).unwrap_err();
    assert!(matches!(err, TemplateError::HelperArgument { ref helper, .. } if helper == "each"));
}
