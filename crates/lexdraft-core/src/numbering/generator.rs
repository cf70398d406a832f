//! Registry of numbering definitions and instances for one render session

use super::error::NumberingError;
use super::model::{AbstractNumDefinition, LevelConfig, LevelOverride, MultiLevelType, NumInstance};
use super::presets::{CustomLegalOptions, ListPreset};
use super::validate::{validate_definition, validate_instance};
use super::xml::serialize_numbering;
use super::levels::MAX_LEVELS;

/// Creates abstract definitions and instances with sequential ids.
///
/// The two id counters are local to this generator. Use a fresh generator
/// per document so ids from unrelated documents never collide.
#[derive(Debug, Default)]
pub struct NumberingGenerator {
    abstract_counter: u32,
    num_counter: u32,
    definitions: Vec<AbstractNumDefinition>,
    instances: Vec<NumInstance>,
}

impl NumberingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero both id counters and forget everything registered so far.
    ///
    /// Intended for tests.
    pub fn reset(&mut self) {
        self.abstract_counter = 0;
        self.num_counter = 0;
        self.definitions.clear();
        self.instances.clear();
    }

    /// Nine-level definition for a preset
    pub fn create_multilevel_list(&mut self, preset: ListPreset) -> AbstractNumDefinition {
        self.create_multilevel_list_with_levels(preset, MAX_LEVELS)
    }

    /// Preset definition trimmed to `level_count` levels (clamped to 1..=9)
    pub fn create_multilevel_list_with_levels(
        &mut self,
        preset: ListPreset,
        level_count: usize,
    ) -> AbstractNumDefinition {
        let definition = AbstractNumDefinition {
            id: self.next_abstract_id(),
            name: Some(preset.as_str().to_string()),
            multi_level_type: preset.multi_level_type(),
            levels: preset.levels(level_count),
        };
        self.definitions.push(definition.clone());
        definition
    }

    pub fn create_custom_legal_format(
        &mut self,
        options: &CustomLegalOptions,
    ) -> Result<AbstractNumDefinition, NumberingError> {
        self.register_definition(
            options.name.clone(),
            MultiLevelType::Multilevel,
            options.levels(),
        )
    }

    /// Validate and register a definition built by the caller
    pub fn register_definition(
        &mut self,
        name: Option<String>,
        multi_level_type: MultiLevelType,
        levels: Vec<LevelConfig>,
    ) -> Result<AbstractNumDefinition, NumberingError> {
        let mut definition = AbstractNumDefinition {
            id: self.abstract_counter + 1,
            name,
            multi_level_type,
            levels,
        };
        validate_definition(&definition)?;
        definition.id = self.next_abstract_id();
        self.definitions.push(definition.clone());
        Ok(definition)
    }

    /// Instance that continues from the definition's own start values
    pub fn create_num_instance(&mut self, abstract_num_id: u32) -> Result<NumInstance, NumberingError> {
        self.push_instance(abstract_num_id, Vec::new())
    }

    /// Instance whose `ilvl` resumes at `start`, for sub-lists that begin fresh
    pub fn create_restart_instance(
        &mut self,
        abstract_num_id: u32,
        ilvl: i32,
        start: i64,
    ) -> Result<NumInstance, NumberingError> {
        self.push_instance(abstract_num_id, vec![LevelOverride { ilvl, start }])
    }

    /// Instance sharing the definition of `previous` with no overrides, so
    /// numbering carries on across a page or section break
    pub fn create_continuation_instance(
        &mut self,
        previous: &NumInstance,
    ) -> Result<NumInstance, NumberingError> {
        self.push_instance(previous.abstract_num_id, Vec::new())
    }

    /// Instance restarting several levels at once
    pub fn create_multi_override_instance(
        &mut self,
        abstract_num_id: u32,
        overrides: &[(i32, i64)],
    ) -> Result<NumInstance, NumberingError> {
        let overrides = overrides
            .iter()
            .map(|&(ilvl, start)| LevelOverride { ilvl, start })
            .collect();
        self.push_instance(abstract_num_id, overrides)
    }

    pub fn definitions(&self) -> &[AbstractNumDefinition] {
        &self.definitions
    }

    pub fn instances(&self) -> &[NumInstance] {
        &self.instances
    }

    pub fn definition(&self, abstract_num_id: u32) -> Option<&AbstractNumDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.id == abstract_num_id)
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.instances.is_empty()
    }

    /// Serialize everything registered on this generator
    pub fn to_xml(&self) -> Result<String, NumberingError> {
        serialize_numbering(&self.definitions, &self.instances)
    }

    fn push_instance(
        &mut self,
        abstract_num_id: u32,
        overrides: Vec<LevelOverride>,
    ) -> Result<NumInstance, NumberingError> {
        let mut instance = NumInstance {
            num_id: self.num_counter + 1,
            abstract_num_id,
            overrides,
        };
        if self.definition(abstract_num_id).is_none() {
            return Err(NumberingError::UnknownAbstractNum {
                num_id: instance.num_id,
                abstract_num_id,
            });
        }
        validate_instance(&instance)?;
        instance.num_id = self.next_num_id();
        self.instances.push(instance.clone());
        Ok(instance)
    }

    fn next_abstract_id(&mut self) -> u32 {
        self.abstract_counter += 1;
        self.abstract_counter
    }

    fn next_num_id(&mut self) -> u32 {
        self.num_counter += 1;
        self.num_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::presets::SuffixStyle;

    #[test]
    fn test_ids_are_sequential_and_independent() {
        let mut generator = NumberingGenerator::new();
        let a = generator.create_multilevel_list(ListPreset::Legal);
        let b = generator.create_multilevel_list(ListPreset::Outline);
        assert_eq!((a.id, b.id), (1, 2));

        let first = generator.create_num_instance(b.id).unwrap();
        let second = generator.create_num_instance(a.id).unwrap();
        assert_eq!((first.num_id, second.num_id), (1, 2));
    }

    #[test]
    fn test_reset_zeroes_counters() {
        let mut generator = NumberingGenerator::new();
        let def = generator.create_multilevel_list(ListPreset::Numbered);
        generator.create_num_instance(def.id).unwrap();
        generator.reset();
        assert!(generator.is_empty());
        let def = generator.create_multilevel_list(ListPreset::Numbered);
        assert_eq!(def.id, 1);
        assert_eq!(generator.create_num_instance(def.id).unwrap().num_id, 1);
    }

    #[test]
    fn test_instance_flavors() {
        let mut generator = NumberingGenerator::new();
        let def = generator.create_multilevel_list(ListPreset::Legal);
        let plain = generator.create_num_instance(def.id).unwrap();
        assert!(plain.overrides.is_empty());

        let restart = generator.create_restart_instance(def.id, 1, 1).unwrap();
        assert_eq!(restart.overrides, vec![LevelOverride { ilvl: 1, start: 1 }]);

        let continued = generator.create_continuation_instance(&plain).unwrap();
        assert_eq!(continued.abstract_num_id, plain.abstract_num_id);
        assert!(continued.overrides.is_empty());
        assert_ne!(continued.num_id, plain.num_id);

        let multi = generator
            .create_multi_override_instance(def.id, &[(0, 5), (2, 1)])
            .unwrap();
        assert_eq!(multi.overrides.len(), 2);
    }

    #[test]
    fn test_restart_instance_rejects_bad_level() {
        let mut generator = NumberingGenerator::new();
        let def = generator.create_multilevel_list(ListPreset::Legal);
        assert_eq!(
            generator.create_restart_instance(def.id, 9, 1),
            Err(NumberingError::InvalidLevel { ilvl: 9 })
        );
        assert_eq!(
            generator.create_restart_instance(def.id, 0, -1),
            Err(NumberingError::NegativeStart { ilvl: 0, start: -1 })
        );
        // failed attempts do not consume ids
        assert_eq!(generator.create_num_instance(def.id).unwrap().num_id, 1);
    }

    #[test]
    fn test_instance_for_unknown_definition() {
        let mut generator = NumberingGenerator::new();
        assert!(matches!(
            generator.create_num_instance(3),
            Err(NumberingError::UnknownAbstractNum { abstract_num_id: 3, .. })
        ));
    }

    #[test]
    fn test_custom_legal_format() {
        let mut generator = NumberingGenerator::new();
        let def = generator
            .create_custom_legal_format(&CustomLegalOptions {
                level_count: 12,
                start_values: vec![3],
                suffix: SuffixStyle::Paren,
                link_headings: true,
                restart_after_parent: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(def.levels.len(), 9);
        assert_eq!(def.levels[0].start, Some(3));
        assert_eq!(def.levels[1].start, Some(1));
        assert_eq!(def.levels[1].level_text, "%1.%2)");
        assert_eq!(def.levels[5].p_style.as_deref(), Some("Heading6"));
        assert_eq!(def.levels[6].p_style, None);
        assert_eq!(def.levels[2].restart_after, Some(1));
    }

    #[test]
    fn test_custom_negative_start_is_rejected() {
        let mut generator = NumberingGenerator::new();
        let err = generator
            .create_custom_legal_format(&CustomLegalOptions {
                level_count: 2,
                start_values: vec![1, -2],
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, NumberingError::NegativeStart { ilvl: 1, start: -2 });
        assert!(generator.definitions().is_empty());
    }

    #[test]
    fn test_to_xml_contains_definitions_then_instances() {
        let mut generator = NumberingGenerator::new();
        let def = generator.create_multilevel_list_with_levels(ListPreset::Legal, 2);
        generator.create_restart_instance(def.id, 1, 1).unwrap();
        let xml = generator.to_xml().unwrap();
        let abstract_pos = xml.find("<w:abstractNum ").unwrap();
        let num_pos = xml.find("<w:num ").unwrap();
        assert!(abstract_pos < num_pos);
        assert!(xml.contains("<w:lvlText w:val=\"%1.%2\"/>"));
        assert!(xml.contains("<w:startOverride w:val=\"1\"/>"));
    }
}
