//! Multilevel list numbering
//!
//! Builds abstract numbering definitions (from presets or custom legal
//! options), numbering instances that reference them, and the WordprocessingML
//! `<w:numbering>` fragment the host document needs. Also provides the
//! render-time [`LevelCounters`] used by the template numbering helpers.

pub mod error;
pub mod format;
pub mod generator;
pub mod levels;
pub mod model;
pub mod presets;
pub mod validate;
pub mod xml;

pub use error::NumberingError;
pub use format::{format_number, LevelCounters};
pub use generator::NumberingGenerator;
pub use levels::{display_level_to_ilvl, ilvl_to_display_level, MAX_ILVL, MAX_LEVELS};
pub use model::{
    AbstractNumDefinition, Indentation, Justification, LevelConfig, LevelOverride,
    MultiLevelType, NumInstance, NumberFormat,
};
pub use presets::{sanitize_level_text, CustomLegalOptions, ListPreset, SuffixStyle};
pub use validate::{validate_definition, validate_instance, validate_level};
pub use xml::{escape_xml, generate_num_pr, serialize_numbering};
