//! Signature, counsel and firm blocks for an attorney of record

use super::contact::derive_contact_fields;
use super::format::address_lines;
use super::{push_some, FieldSet};
use crate::model::contact::non_empty;
use crate::model::Attorney;

const CLOSING: &str = "Respectfully submitted,";
const SIGNATURE_LINE: &str = "______________________________";
const ATTORNEY_FOR: &str = "Attorney for [Party]";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttorneyFields {
    pub signature_block: String,
    pub counsel_block: String,
    pub bar_number_line: Option<String>,
    pub firm_block: Option<String>,
}

impl FieldSet for AttorneyFields {
    fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            ("signatureBlock", self.signature_block.clone()),
            ("counselBlock", self.counsel_block.clone()),
        ];
        push_some(&mut entries, "barNumberLine", &self.bar_number_line);
        push_some(&mut entries, "firmBlock", &self.firm_block);
        entries
    }
}

pub fn derive_attorney_fields(attorney: &Attorney) -> AttorneyFields {
    let contact = derive_contact_fields(&attorney.contact);
    let name = contact
        .full_name_with_suffix
        .clone()
        .or_else(|| contact.display_name.clone());

    let bar_number_line = non_empty(&attorney.bar_number).map(|number| {
        match non_empty(&attorney.bar_state) {
            Some(state) => format!("{} Bar No. {}", state, number),
            None => format!("Bar No. {}", number),
        }
    });

    let firm_name = non_empty(&attorney.firm_name).map(str::to_string);
    let firm_address = attorney
        .firm_address
        .as_ref()
        .or(attorney.contact.address.as_ref())
        .map(address_lines)
        .unwrap_or_default();

    let firm_block = firm_name.as_ref().map(|firm| {
        std::iter::once(firm.clone())
            .chain(firm_address.iter().cloned())
            .collect::<Vec<_>>()
            .join("\n")
    });

    let contact_lines: Vec<String> = [&contact.phone_line, &contact.fax_line, &contact.email_line]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

    let mut signature = vec![CLOSING.to_string(), String::new(), SIGNATURE_LINE.to_string()];
    signature.extend(name.clone());
    signature.extend(bar_number_line.clone());
    signature.extend(firm_name.clone());
    signature.extend(firm_address.iter().cloned());
    signature.extend(contact_lines.iter().cloned());
    signature.push(ATTORNEY_FOR.to_string());

    let mut counsel = Vec::new();
    counsel.extend(name);
    counsel.extend(bar_number_line.clone());
    counsel.extend(firm_name);
    counsel.extend(firm_address);
    counsel.extend(contact_lines.into_iter().filter(|line| !line.starts_with("Fax:")));

    AttorneyFields {
        signature_block: signature.join("\n"),
        counsel_block: counsel.join("\n"),
        bar_number_line,
        firm_block,
    }
}
