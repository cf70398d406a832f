//! Name, salutation and address fields for a single contact

use super::format::{address_block, city_state, city_state_zip, join_present};
use super::{push_some, FieldSet};
use crate::model::Contact;

/// Chooses the courtesy prefix used in formal salutations.
///
/// Only an explicitly supplied prefix is used today. Implementations may
/// decide, for example, to drop "Mr." when the suffix is "Esq.".
pub trait PrefixInference {
    fn prefix(&self, contact: &Contact) -> Option<String>;
}

/// Uses the contact's own prefix and never guesses one
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrefixInference;

impl PrefixInference for NoPrefixInference {
    fn prefix(&self, contact: &Contact) -> Option<String> {
        contact.prefix().map(str::to_string)
    }
}

/// Presentation strings derived from a [`Contact`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFields {
    pub full_name: Option<String>,
    pub full_name_with_prefix: Option<String>,
    pub full_name_with_suffix: Option<String>,
    pub full_name_formal: Option<String>,
    pub salutation: Option<String>,
    pub salutation_informal: Option<String>,
    /// Person's name, or the company for organization-only records
    pub display_name: Option<String>,
    pub company: Option<String>,
    pub address_block: Option<String>,
    pub city_state_zip: Option<String>,
    pub city_state: Option<String>,
    pub email_line: Option<String>,
    pub phone_line: Option<String>,
    pub fax_line: Option<String>,
}

impl FieldSet for ContactFields {
    fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();
        push_some(&mut entries, "fullName", &self.full_name);
        push_some(&mut entries, "fullNameWithPrefix", &self.full_name_with_prefix);
        push_some(&mut entries, "fullNameWithSuffix", &self.full_name_with_suffix);
        push_some(&mut entries, "fullNameFormal", &self.full_name_formal);
        push_some(&mut entries, "salutation", &self.salutation);
        push_some(&mut entries, "salutationInformal", &self.salutation_informal);
        push_some(&mut entries, "displayName", &self.display_name);
        push_some(&mut entries, "company", &self.company);
        push_some(&mut entries, "addressBlock", &self.address_block);
        push_some(&mut entries, "cityStateZip", &self.city_state_zip);
        push_some(&mut entries, "cityState", &self.city_state);
        push_some(&mut entries, "emailLine", &self.email_line);
        push_some(&mut entries, "phoneLine", &self.phone_line);
        push_some(&mut entries, "faxLine", &self.fax_line);
        entries
    }
}

pub fn derive_contact_fields(contact: &Contact) -> ContactFields {
    derive_contact_fields_with(contact, &NoPrefixInference)
}

pub fn derive_contact_fields_with(contact: &Contact, inference: &dyn PrefixInference) -> ContactFields {
    let mut fields = ContactFields {
        company: contact.company().map(str::to_string),
        email_line: contact.email().map(|email| format!("Email: {}", email)),
        phone_line: contact.phone().map(|phone| format!("Tel: {}", phone)),
        fax_line: contact.fax().map(|fax| format!("Fax: {}", fax)),
        ..Default::default()
    };

    if let Some(address) = &contact.address {
        fields.address_block = some_if_present(address_block(address));
        fields.city_state_zip = some_if_present(city_state_zip(address));
        fields.city_state = some_if_present(city_state(address));
    }

    let full_name = join_present(
        [contact.first_name(), contact.middle_name(), contact.last_name()],
        " ",
    );
    if full_name.is_empty() {
        // Organization-only records get no individual-name fields
        fields.display_name = fields.company.clone();
        return fields;
    }

    let prefix = inference.prefix(contact);
    let with_suffix = match contact.suffix() {
        Some(suffix) => format!("{}, {}", full_name, suffix),
        None => full_name.clone(),
    };

    fields.full_name_with_prefix = Some(join_present(
        [prefix.as_deref(), Some(full_name.as_str())],
        " ",
    ));
    fields.full_name_formal = Some(join_present(
        [prefix.as_deref(), Some(with_suffix.as_str())],
        " ",
    ));
    fields.salutation = Some(match (prefix.as_deref(), contact.last_name()) {
        (Some(prefix), Some(last)) => format!("Dear {} {}:", prefix, last),
        _ => format!("Dear {}:", full_name),
    });
    fields.salutation_informal = Some(match contact.first_name() {
        Some(first) => format!("Dear {},", first),
        None => format!("Dear {},", full_name),
    });
    fields.display_name = Some(full_name.clone());
    fields.full_name_with_suffix = Some(with_suffix);
    fields.full_name = Some(full_name);
    fields
}

fn some_if_present(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
