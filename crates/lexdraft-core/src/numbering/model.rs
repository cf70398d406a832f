use serde::{Deserialize, Serialize};

/// `w:numFmt` values supported by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormat {
    Decimal,
    UpperLetter,
    LowerLetter,
    UpperRoman,
    LowerRoman,
    Bullet,
    None,
}

impl NumberFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            NumberFormat::Decimal => "decimal",
            NumberFormat::UpperLetter => "upperLetter",
            NumberFormat::LowerLetter => "lowerLetter",
            NumberFormat::UpperRoman => "upperRoman",
            NumberFormat::LowerRoman => "lowerRoman",
            NumberFormat::Bullet => "bullet",
            NumberFormat::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Justification {
    Left,
    Center,
    Right,
}

impl Justification {
    pub fn as_str(self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
        }
    }
}

/// Paragraph indentation in twentieths of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indentation {
    pub left: u32,
    pub hanging: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MultiLevelType {
    SingleLevel,
    Multilevel,
    HybridMultilevel,
}

impl MultiLevelType {
    pub fn as_str(self) -> &'static str {
        match self {
            MultiLevelType::SingleLevel => "singleLevel",
            MultiLevelType::Multilevel => "multilevel",
            MultiLevelType::HybridMultilevel => "hybridMultilevel",
        }
    }
}

/// One tier of a multilevel list.
///
/// `ilvl` and `start` are signed so that definitions supplied from outside
/// can be checked by [`crate::numbering::validate_level`] instead of failing
/// at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub ilvl: i32,
    #[serde(default)]
    pub start: Option<i64>,
    pub num_fmt: NumberFormat,
    /// Pattern with `%1`..`%9` placeholders for ancestor numbers
    pub level_text: String,
    /// Linked heading style, only honoured for levels 0..=5
    #[serde(default)]
    pub p_style: Option<String>,
    /// Restart this level after the given (0-based) level
    #[serde(default)]
    pub restart_after: Option<i32>,
    #[serde(default)]
    pub justification: Option<Justification>,
    #[serde(default)]
    pub indent: Option<Indentation>,
    #[serde(default)]
    pub bullet_font: Option<String>,
}

impl LevelConfig {
    pub fn new(ilvl: i32, num_fmt: NumberFormat, level_text: impl Into<String>) -> Self {
        Self {
            ilvl,
            start: Some(1),
            num_fmt,
            level_text: level_text.into(),
            p_style: None,
            restart_after: None,
            justification: Some(Justification::Left),
            indent: None,
            bullet_font: None,
        }
    }

    pub fn with_indent(mut self, left: u32, hanging: u32) -> Self {
        self.indent = Some(Indentation { left, hanging });
        self
    }

    pub fn start_value(&self) -> i64 {
        self.start.unwrap_or(1)
    }
}

/// A reusable list style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbstractNumDefinition {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub multi_level_type: MultiLevelType,
    pub levels: Vec<LevelConfig>,
}

impl AbstractNumDefinition {
    pub fn level(&self, ilvl: i32) -> Option<&LevelConfig> {
        self.levels.iter().find(|level| level.ilvl == ilvl)
    }
}

/// Restart override for one level of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelOverride {
    pub ilvl: i32,
    pub start: i64,
}

/// A concrete use of an abstract definition in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumInstance {
    pub num_id: u32,
    pub abstract_num_id: u32,
    #[serde(default)]
    pub overrides: Vec<LevelOverride>,
}
