use serde::{Deserialize, Serialize};

/// Postal address as supplied by the contact collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street1: Option<String>,
    pub street2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

/// Person or organization record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub prefix: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub suffix: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub address: Option<Address>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
}

impl Contact {
    /// A contact is usable when it names a person or a company
    pub fn is_valid(&self) -> bool {
        self.first_name().is_some() || self.last_name().is_some() || self.company().is_some()
    }

    pub fn prefix(&self) -> Option<&str> {
        non_empty(&self.prefix)
    }

    pub fn first_name(&self) -> Option<&str> {
        non_empty(&self.first_name)
    }

    pub fn middle_name(&self) -> Option<&str> {
        non_empty(&self.middle_name)
    }

    pub fn last_name(&self) -> Option<&str> {
        non_empty(&self.last_name)
    }

    pub fn suffix(&self) -> Option<&str> {
        non_empty(&self.suffix)
    }

    pub fn company(&self) -> Option<&str> {
        non_empty(&self.company)
    }

    pub fn email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    pub fn phone(&self) -> Option<&str> {
        non_empty(&self.phone)
    }

    pub fn fax(&self) -> Option<&str> {
        non_empty(&self.fax)
    }

    /// True when no individual name part is present
    pub fn is_company_only(&self) -> bool {
        self.first_name().is_none() && self.last_name().is_none() && self.company().is_some()
    }
}

/// Which side of the caption a role belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartySide {
    Plaintiff,
    Defendant,
}

/// Caption role of a party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartyRole {
    Plaintiff,
    Petitioner,
    Appellant,
    Claimant,
    CrossComplainant,
    Defendant,
    Respondent,
    Appellee,
    CrossDefendant,
    RealPartyInInterest,
}

impl PartyRole {
    pub const PLAINTIFF_SIDE: [PartyRole; 5] = [
        PartyRole::Plaintiff,
        PartyRole::Petitioner,
        PartyRole::Appellant,
        PartyRole::Claimant,
        PartyRole::CrossComplainant,
    ];

    pub const DEFENDANT_SIDE: [PartyRole; 5] = [
        PartyRole::Defendant,
        PartyRole::Respondent,
        PartyRole::Appellee,
        PartyRole::CrossDefendant,
        PartyRole::RealPartyInInterest,
    ];

    pub fn side(self) -> PartySide {
        if Self::PLAINTIFF_SIDE.contains(&self) {
            PartySide::Plaintiff
        } else {
            PartySide::Defendant
        }
    }

    /// Display label as it appears in a caption
    pub fn label(self) -> &'static str {
        match self {
            PartyRole::Plaintiff => "Plaintiff",
            PartyRole::Petitioner => "Petitioner",
            PartyRole::Appellant => "Appellant",
            PartyRole::Claimant => "Claimant",
            PartyRole::CrossComplainant => "Cross-Complainant",
            PartyRole::Defendant => "Defendant",
            PartyRole::Respondent => "Respondent",
            PartyRole::Appellee => "Appellee",
            PartyRole::CrossDefendant => "Cross-Defendant",
            PartyRole::RealPartyInInterest => "Real Party in Interest",
        }
    }

    pub fn plural_label(self) -> &'static str {
        match self {
            PartyRole::Plaintiff => "Plaintiffs",
            PartyRole::Petitioner => "Petitioners",
            PartyRole::Appellant => "Appellants",
            PartyRole::Claimant => "Claimants",
            PartyRole::CrossComplainant => "Cross-Complainants",
            PartyRole::Defendant => "Defendants",
            PartyRole::Respondent => "Respondents",
            PartyRole::Appellee => "Appellees",
            PartyRole::CrossDefendant => "Cross-Defendants",
            PartyRole::RealPartyInInterest => "Real Parties in Interest",
        }
    }
}

/// Litigation party: a contact with a caption role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(flatten)]
    pub contact: Contact,
    pub role: PartyRole,
    #[serde(default)]
    pub is_entity: bool,
    /// Entity designator such as "Inc." or "LLC"
    #[serde(default)]
    pub entity_type: Option<String>,
}

/// Attorney of record: a contact plus bar and firm details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attorney {
    #[serde(flatten)]
    pub contact: Contact,
    #[serde(default)]
    pub bar_number: Option<String>,
    #[serde(default)]
    pub bar_state: Option<String>,
    #[serde(default)]
    pub firm_name: Option<String>,
    #[serde(default)]
    pub firm_address: Option<Address>,
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
