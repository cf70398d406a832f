//! Shared line formatting for names and addresses

use crate::model::Address;

use crate::model::contact::non_empty;

/// Join the present, non-blank parts with `separator`
pub fn join_present<'a>(parts: impl IntoIterator<Item = Option<&'a str>>, separator: &str) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// "City, ST ZIP", dropping whichever pieces are absent
pub fn city_state_zip(address: &Address) -> String {
    let region = join_present([non_empty(&address.state), non_empty(&address.zip)], " ");
    join_present([non_empty(&address.city), Some(region.as_str())], ", ")
}

/// "City, ST"
pub fn city_state(address: &Address) -> String {
    join_present([non_empty(&address.city), non_empty(&address.state)], ", ")
}

/// Street 1, optional street 2, then the city line when any part of it is present
pub fn address_lines(address: &Address) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(street) = non_empty(&address.street1) {
        lines.push(street.to_string());
    }
    if let Some(street) = non_empty(&address.street2) {
        lines.push(street.to_string());
    }
    let city_line = city_state_zip(address);
    if !city_line.is_empty() {
        lines.push(city_line);
    }
    if let Some(country) = non_empty(&address.country) {
        lines.push(country.to_string());
    }
    lines
}

pub fn address_block(address: &Address) -> String {
    address_lines(address).join("\n")
}
