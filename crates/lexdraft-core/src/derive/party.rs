//! Caption fields for a list of litigation parties

use super::contact::derive_contact_fields;
use super::FieldSet;
use crate::model::{Party, PartySide};

/// Caption strings derived from all parties of a matter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartyFields {
    pub plaintiff_names: String,
    pub defendant_names: String,
    pub plaintiff_names_et_al: String,
    pub defendant_names_et_al: String,
    pub plaintiff_label: String,
    pub defendant_label: String,
    pub all_parties_with_roles: String,
    pub proof_of_service_list: String,
    pub versus_text: String,
}

impl FieldSet for PartyFields {
    fn entries(&self) -> Vec<(&'static str, String)> {
        [
            ("plaintiffNames", &self.plaintiff_names),
            ("defendantNames", &self.defendant_names),
            ("plaintiffNamesEtAl", &self.plaintiff_names_et_al),
            ("defendantNamesEtAl", &self.defendant_names_et_al),
            ("plaintiffLabel", &self.plaintiff_label),
            ("defendantLabel", &self.defendant_label),
            ("allPartiesWithRoles", &self.all_parties_with_roles),
            ("proofOfServiceList", &self.proof_of_service_list),
            ("versusText", &self.versus_text),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key, value.clone()))
        .collect()
    }
}

/// Caption name of one party.
///
/// Entities get their designator appended unless the company name already ends with it.
pub fn format_party_name(party: &Party) -> String {
    let contact = &party.contact;
    if party.is_entity || contact.is_company_only() {
        let company = contact.company().unwrap_or_default();
        return match party.entity_type.as_deref().map(str::trim) {
            Some(entity) if !entity.is_empty() && !has_entity_suffix(company, entity) => {
                format!("{}, {}", company, entity)
            }
            _ => company.to_string(),
        };
    }

    let fields = derive_contact_fields(contact);
    fields
        .full_name_with_suffix
        .or(fields.display_name)
        .unwrap_or_default()
}

/// Whether the designator already appears in the company name as whole words,
/// anywhere in it ("Acme Inc. (Delaware)" already carries "Inc.")
fn has_entity_suffix(company: &str, entity: &str) -> bool {
    let company = name_words(company);
    let entity = name_words(entity);
    !entity.is_empty()
        && company
            .windows(entity.len())
            .any(|window| window == entity.as_slice())
}

/// Lowercased words split on whitespace and commas, without surrounding
/// parentheses or trailing periods
fn name_words(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .map(|word| word.trim_matches(|c: char| c == '(' || c == ')').trim_end_matches('.'))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn derive_party_fields(parties: &[Party], versus_style: &str) -> PartyFields {
    let (plaintiffs, defendants): (Vec<&Party>, Vec<&Party>) = parties
        .iter()
        .partition(|party| party.role.side() == PartySide::Plaintiff);

    PartyFields {
        plaintiff_names: upper_names(&plaintiffs),
        defendant_names: upper_names(&defendants),
        plaintiff_names_et_al: et_al(&plaintiffs),
        defendant_names_et_al: et_al(&defendants),
        plaintiff_label: side_label(&plaintiffs),
        defendant_label: side_label(&defendants),
        all_parties_with_roles: parties
            .iter()
            .map(|party| format!("{}, {}", format_party_name(party).to_uppercase(), party.role.label()))
            .collect::<Vec<_>>()
            .join("\n"),
        proof_of_service_list: parties
            .iter()
            .map(service_entry)
            .collect::<Vec<_>>()
            .join("\n\n"),
        versus_text: versus_style.to_string(),
    }
}

fn upper_names(side: &[&Party]) -> String {
    side.iter()
        .map(|party| format_party_name(party).to_uppercase())
        .collect::<Vec<_>>()
        .join(", ")
}

fn et_al(side: &[&Party]) -> String {
    match side {
        [] => String::new(),
        [only] => format_party_name(only).to_uppercase(),
        [first, ..] => format!("{}, et al.", format_party_name(first).to_uppercase()),
    }
}

fn side_label(side: &[&Party]) -> String {
    match side {
        [] => String::new(),
        [only] => only.role.label().to_string(),
        [first, ..] => first.role.plural_label().to_string(),
    }
}

fn service_entry(party: &Party) -> String {
    let mut lines = vec![format_party_name(party), party.role.label().to_string()];
    if let Some(block) = derive_contact_fields(&party.contact).address_block {
        lines.push(block);
    }
    lines.join("\n")
}
