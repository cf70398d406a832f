//! Field derivation rules
//!
//! Pure functions turning contact-shaped records into presentation strings
//! (names, salutations, address blocks, captions, signature blocks). They
//! never fail: absent inputs simply leave the corresponding field out.

pub mod attorney;
pub mod contact;
pub mod format;
pub mod party;

pub use attorney::{derive_attorney_fields, AttorneyFields};
pub use contact::{derive_contact_fields, derive_contact_fields_with, ContactFields, NoPrefixInference, PrefixInference};
pub use party::{derive_party_fields, format_party_name, PartyFields};

/// A derived record that can be flattened into `field → string` pairs
pub trait FieldSet {
    /// Present fields only, keyed by their template-facing (camelCase) names
    fn entries(&self) -> Vec<(&'static str, String)>;
}

pub(crate) fn push_some(entries: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        entries.push((key, value.clone()));
    }
}
