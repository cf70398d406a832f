use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::contact::{Address, Attorney};
use crate::error::{LexdraftError, Result};

/// Signed-in user's profile, read-only from the engine's point of view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub attorney: Option<Attorney>,
    pub firm: Option<FirmInfo>,
    pub defaults: ProfileDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirmInfo {
    pub name: Option<String>,
    pub address: Option<Address>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDefaults {
    pub letterhead_id: Option<String>,
    pub signature_id: Option<String>,
    /// Fill empty date variables with today's date
    pub auto_date: bool,
    /// Caption-format flags from the jurisdiction lookup, passed through as-is
    pub jurisdiction: Option<Value>,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            letterhead_id: None,
            signature_id: None,
            auto_date: true,
            jurisdiction: None,
        }
    }
}

impl UserProfile {
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| LexdraftError::ProfileInvalid(e.to_string()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LexdraftError::ProfileInvalid(e.to_string()))
    }
}
