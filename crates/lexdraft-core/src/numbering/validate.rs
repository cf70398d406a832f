//! Structural checks that must pass before a definition is serialized

use std::collections::HashSet;

use super::error::NumberingError;
use super::levels::{is_valid_ilvl, MAX_LEVELS};
use super::model::{AbstractNumDefinition, LevelConfig, NumInstance};

pub fn validate_level(level: &LevelConfig) -> Result<(), NumberingError> {
    if !is_valid_ilvl(level.ilvl as i64) {
        return Err(NumberingError::InvalidLevel {
            ilvl: level.ilvl as i64,
        });
    }
    if level.level_text.trim().is_empty() {
        return Err(NumberingError::EmptyLevelText { ilvl: level.ilvl });
    }
    if let Some(start) = level.start {
        if start < 0 {
            return Err(NumberingError::NegativeStart {
                ilvl: level.ilvl,
                start,
            });
        }
    }
    if let Some(restart) = level.restart_after {
        if !is_valid_ilvl(restart as i64) {
            return Err(NumberingError::InvalidLevel {
                ilvl: restart as i64,
            });
        }
    }
    Ok(())
}

pub fn validate_definition(definition: &AbstractNumDefinition) -> Result<(), NumberingError> {
    if definition.levels.is_empty() {
        return Err(NumberingError::NoLevels { id: definition.id });
    }
    if definition.levels.len() > MAX_LEVELS {
        return Err(NumberingError::TooManyLevels {
            id: definition.id,
            count: definition.levels.len(),
        });
    }

    let mut seen = HashSet::new();
    for level in &definition.levels {
        validate_level(level)?;
        if !seen.insert(level.ilvl) {
            return Err(NumberingError::DuplicateLevel { ilvl: level.ilvl });
        }
    }
    Ok(())
}

pub fn validate_instance(instance: &NumInstance) -> Result<(), NumberingError> {
    let mut seen = HashSet::new();
    for item in &instance.overrides {
        if !is_valid_ilvl(item.ilvl as i64) {
            return Err(NumberingError::InvalidLevel {
                ilvl: item.ilvl as i64,
            });
        }
        if item.start < 0 {
            return Err(NumberingError::NegativeStart {
                ilvl: item.ilvl,
                start: item.start,
            });
        }
        if !seen.insert(item.ilvl) {
            return Err(NumberingError::DuplicateLevel { ilvl: item.ilvl });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::model::{LevelOverride, MultiLevelType, NumberFormat};

    fn definition(levels: Vec<LevelConfig>) -> AbstractNumDefinition {
        AbstractNumDefinition {
            id: 1,
            name: None,
            multi_level_type: MultiLevelType::Multilevel,
            levels,
        }
    }

    #[test]
    fn test_valid_definition_passes() {
        let def = definition(vec![
            LevelConfig::new(0, NumberFormat::Decimal, "%1."),
            LevelConfig::new(1, NumberFormat::LowerLetter, "%2."),
        ]);
        assert_eq!(validate_definition(&def), Ok(()));
    }

    #[test]
    fn test_level_out_of_range() {
        let def = definition(vec![LevelConfig::new(9, NumberFormat::Decimal, "%1.")]);
        assert_eq!(
            validate_definition(&def),
            Err(NumberingError::InvalidLevel { ilvl: 9 })
        );
        let def = definition(vec![LevelConfig::new(-1, NumberFormat::Decimal, "%1.")]);
        assert_eq!(
            validate_definition(&def),
            Err(NumberingError::InvalidLevel { ilvl: -1 })
        );
    }

    #[test]
    fn test_duplicate_level() {
        let def = definition(vec![
            LevelConfig::new(0, NumberFormat::Decimal, "%1."),
            LevelConfig::new(0, NumberFormat::Decimal, "%1)"),
        ]);
        assert_eq!(
            validate_definition(&def),
            Err(NumberingError::DuplicateLevel { ilvl: 0 })
        );
    }

    #[test]
    fn test_empty_text_and_negative_start() {
        let def = definition(vec![LevelConfig::new(0, NumberFormat::Decimal, "  ")]);
        assert_eq!(
            validate_definition(&def),
            Err(NumberingError::EmptyLevelText { ilvl: 0 })
        );

        let mut level = LevelConfig::new(2, NumberFormat::Decimal, "%3.");
        level.start = Some(-4);
        assert_eq!(
            validate_level(&level),
            Err(NumberingError::NegativeStart { ilvl: 2, start: -4 })
        );
    }

    #[test]
    fn test_empty_definition() {
        assert_eq!(
            validate_definition(&definition(Vec::new())),
            Err(NumberingError::NoLevels { id: 1 })
        );
    }

    #[test]
    fn test_instance_overrides() {
        let instance = NumInstance {
            num_id: 3,
            abstract_num_id: 1,
            overrides: vec![
                LevelOverride { ilvl: 1, start: 1 },
                LevelOverride { ilvl: 1, start: 2 },
            ],
        };
        assert_eq!(
            validate_instance(&instance),
            Err(NumberingError::DuplicateLevel { ilvl: 1 })
        );
    }
}
