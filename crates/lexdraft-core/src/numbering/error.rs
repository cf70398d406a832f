use thiserror::Error;

/// Structural defects in a numbering definition or instance.
///
/// These indicate a bad preset or configuration, not bad user data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberingError {
    #[error("INVALID_LEVEL: level index {ilvl} is outside 0..=8")]
    InvalidLevel { ilvl: i64 },

    #[error("DUPLICATE_LEVEL: level {ilvl} is defined more than once")]
    DuplicateLevel { ilvl: i32 },

    #[error("EMPTY_LEVEL_TEXT: level {ilvl} has no level text")]
    EmptyLevelText { ilvl: i32 },

    #[error("NEGATIVE_START: level {ilvl} starts at {start}")]
    NegativeStart { ilvl: i32, start: i64 },

    #[error("NO_LEVELS: abstract numbering {id} has no levels")]
    NoLevels { id: u32 },

    #[error("TOO_MANY_LEVELS: abstract numbering {id} has {count} levels (max 9)")]
    TooManyLevels { id: u32, count: usize },

    #[error("UNKNOWN_PRESET: '{0}' is not a numbering preset")]
    UnknownPreset(String),

    #[error("UNKNOWN_ABSTRACT_NUM: numbering instance {num_id} references missing abstract numbering {abstract_num_id}")]
    UnknownAbstractNum { num_id: u32, abstract_num_id: u32 },
}
