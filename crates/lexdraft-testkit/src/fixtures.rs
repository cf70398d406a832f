//! JSON fixtures for contacts, parties, attorneys, profiles and templates

use serde_json::{Value, json};

/// Individual with first and last name only
pub fn ann_lee() -> Value {
    json!({ "firstName": "Ann", "lastName": "Lee" })
}

/// Individual with prefix, middle name, suffix and a full address
pub fn jane_doe() -> Value {
    json!({
        "prefix": "Ms.",
        "firstName": "Jane",
        "middleName": "Q.",
        "lastName": "Doe",
        "suffix": "Jr.",
        "email": "jane.doe@example.com",
        "phone": "(775) 555-0100",
        "address": {
            "street1": "1 Main St",
            "street2": "Suite 200",
            "city": "Reno",
            "state": "NV",
            "zip": "89501"
        }
    })
}

/// Organization without any personal name
pub fn acme_corp() -> Value {
    json!({
        "company": "Acme Corp",
        "address": { "street1": "500 Industrial Way", "city": "Sparks", "state": "NV", "zip": "89431" }
    })
}

pub fn party(contact: Value, role: &str) -> Value {
    let mut party = contact;
    party["role"] = json!(role);
    party
}

pub fn entity_party(company: &str, entity_type: &str, role: &str) -> Value {
    json!({
        "company": company,
        "role": role,
        "isEntity": true,
        "entityType": entity_type
    })
}

/// Two plaintiffs against one corporate defendant
pub fn caption_parties() -> Value {
    json!([
        { "firstName": "Jane", "lastName": "Doe", "role": "plaintiff" },
        { "firstName": "John", "lastName": "Roe", "role": "plaintiff" },
        { "company": "Acme", "role": "defendant", "isEntity": true, "entityType": "Inc." }
    ])
}

pub fn attorney() -> Value {
    json!({
        "firstName": "Dana",
        "lastName": "Park",
        "suffix": "Esq.",
        "email": "dana@parklee.law",
        "phone": "(555) 010-2000",
        "barNumber": "123456",
        "barState": "CA",
        "firmName": "Park & Lee LLP",
        "firmAddress": {
            "street1": "100 Market St",
            "city": "San Francisco",
            "state": "CA",
            "zip": "94105"
        }
    })
}

/// Profile with an attorney, firm and auto-dating enabled
pub fn user_profile() -> Value {
    json!({
        "attorney": attorney(),
        "firm": { "name": "Park & Lee LLP", "phone": "(555) 010-2000" },
        "defaults": {
            "letterheadId": "lh-standard",
            "signatureId": "sig-dana",
            "autoDate": true
        }
    })
}

/// Demand letter with contact cascades, a conditional and a numeric range
pub fn demand_letter_template() -> Value {
    json!({
        "id": "demand-letter",
        "version": "1",
        "name": "Demand Letter",
        "body": "{{recipient$.salutation}}\n\nRe: {{subject}}\n\nAmount due: {{amount}}\n{{#if includeDeadline}}Pay by {{formatDate deadline}}.{{/if}}",
        "variables": [
            {
                "id": "recipient",
                "type": "contact",
                "label": "Recipient",
                "required": true,
                "cascades": [
                    { "targetVariable": "recipientName", "expression": "{{recipient.firstName}} {{recipient.lastName}}" }
                ]
            },
            { "id": "recipientName", "type": "text" },
            { "id": "subject", "type": "text", "required": true, "defaultValue": "Outstanding balance" },
            { "id": "amount", "type": "number", "label": "Amount", "config": { "min": 0, "max": 1000000 } },
            { "id": "includeDeadline", "type": "boolean", "defaultValue": false },
            {
                "id": "deadline",
                "type": "date",
                "required": true,
                "conditional": { "dependsOn": "includeDeadline", "operator": "equals", "value": true }
            },
            { "id": "letterDate", "type": "date" }
        ]
    })
}

/// Complaint caption with a party list and a versus style
pub fn caption_template() -> Value {
    json!({
        "id": "complaint-caption",
        "version": "1",
        "body": "{{parties$.plaintiffNamesEtAl}}, {{parties$.plaintiffLabel}},\n{{parties$.versusText}}\n{{parties$.defendantNames}}, {{parties$.defendantLabel}}.",
        "variables": [
            { "id": "parties", "type": "party", "required": true, "config": { "versusStyle": "vs." } }
        ]
    })
}
