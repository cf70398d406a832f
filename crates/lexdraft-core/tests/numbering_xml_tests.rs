//! `<w:numbering>` output re-parsed with quick-xml, plus property tests over
//! generated definitions and instances

use std::collections::{BTreeMap, BTreeSet};

use lexdraft_core::numbering::{
    CustomLegalOptions, LevelConfig, ListPreset, MultiLevelType, NumberFormat, NumberingError,
    NumberingGenerator, SuffixStyle,
};
use proptest::prelude::*;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// What a parsed numbering part contains
#[derive(Debug, Default)]
struct ParsedNumbering {
    /// abstractNumId → ilvl values in document order
    levels: BTreeMap<u32, Vec<i32>>,
    /// abstractNumId → lvlText values (unescaped)
    level_texts: BTreeMap<u32, Vec<String>>,
    /// numId values in document order
    num_ids: Vec<u32>,
}

fn attr(element: &BytesStart<'_>, name: &str) -> Option<String> {
    element
        .try_get_attribute(name)
        .ok()
        .flatten()
        .map(|attribute| String::from_utf8_lossy(&attribute.value).into_owned())
}

fn parse(xml: &str) -> ParsedNumbering {
    let mut reader = Reader::from_str(xml);
    let mut parsed = ParsedNumbering::default();
    let mut current_abstract = None;

    loop {
        match reader.read_event().expect("numbering XML must be well-formed") {
            Event::Start(element) | Event::Empty(element) => match element.name().as_ref() {
                b"w:abstractNum" => {
                    let id = attr(&element, "w:abstractNumId").unwrap().parse().unwrap();
                    parsed.levels.insert(id, Vec::new());
                    parsed.level_texts.insert(id, Vec::new());
                    current_abstract = Some(id);
                }
                b"w:lvl" => {
                    let id = current_abstract.expect("w:lvl outside w:abstractNum");
                    let ilvl = attr(&element, "w:ilvl").unwrap().parse().unwrap();
                    parsed.levels.get_mut(&id).unwrap().push(ilvl);
                }
                b"w:lvlText" => {
                    let id = current_abstract.expect("w:lvlText outside w:abstractNum");
                    let raw = attr(&element, "w:val").unwrap();
                    let text = quick_xml::escape::unescape(&raw).unwrap().into_owned();
                    parsed.level_texts.get_mut(&id).unwrap().push(text);
                }
                b"w:num" => {
                    current_abstract = None;
                    parsed.num_ids.push(attr(&element, "w:numId").unwrap().parse().unwrap());
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    parsed
}

#[test]
fn test_legal_preset_round_trips() {
    let mut generator = NumberingGenerator::new();
    let definition = generator.create_multilevel_list(ListPreset::Legal);
    generator.create_num_instance(definition.id).unwrap();

    let parsed = parse(&generator.to_xml().unwrap());
    assert_eq!(parsed.levels[&1], (0..9).collect::<Vec<_>>());
    assert_eq!(parsed.level_texts[&1][0], "%1");
    assert_eq!(parsed.level_texts[&1][3], "%1.%2.%3.%4");
    assert_eq!(parsed.num_ids, vec![1]);
}

#[test]
fn test_special_characters_are_escaped() {
    let mut generator = NumberingGenerator::new();
    let definition = generator
        .register_definition(
            Some("Terms & Conditions".to_string()),
            MultiLevelType::Multilevel,
            vec![LevelConfig::new(0, NumberFormat::Decimal, "Section %1 & %2")],
        )
        .unwrap();
    generator.create_num_instance(definition.id).unwrap();

    let xml = generator.to_xml().unwrap();
    assert!(xml.contains("Terms &amp; Conditions"));
    assert!(xml.contains("w:val=\"Section %1 &amp; %2\""));
    assert!(!xml.contains("Section %1 & %2"));
    assert_eq!(parse(&xml).level_texts[&1], vec!["Section %1 & %2".to_string()]);
}

#[test]
fn test_custom_legal_prefix_is_sanitized() {
    let mut generator = NumberingGenerator::new();
    let definition = generator
        .create_custom_legal_format(&CustomLegalOptions {
            level_count: 2,
            prefix: Some("Section <".to_string()),
            suffix: SuffixStyle::None,
            ..Default::default()
        })
        .unwrap();
    generator.create_num_instance(definition.id).unwrap();

    let parsed = parse(&generator.to_xml().unwrap());
    assert_eq!(parsed.level_texts[&1], vec!["Section %1".to_string(), "%1.%2".to_string()]);
}

#[test]
fn test_instances_reference_their_definitions() {
    let mut generator = NumberingGenerator::new();
    let legal = generator.create_multilevel_list(ListPreset::Legal);
    let outline = generator.create_multilevel_list_with_levels(ListPreset::Outline, 4);
    let first = generator.create_num_instance(legal.id).unwrap();
    generator.create_restart_instance(outline.id, 2, 5).unwrap();
    generator.create_continuation_instance(&first).unwrap();

    let xml = generator.to_xml().unwrap();
    let parsed = parse(&xml);
    assert_eq!(parsed.levels[&2], vec![0, 1, 2, 3]);
    assert_eq!(parsed.num_ids, vec![1, 2, 3]);
    assert!(xml.contains("<w:lvlOverride w:ilvl=\"2\"><w:startOverride w:val=\"5\"/></w:lvlOverride>"));
}

#[test]
fn test_unknown_definition_is_rejected() {
    let mut generator = NumberingGenerator::new();
    let err = generator.create_num_instance(7).unwrap_err();
    assert!(matches!(err, NumberingError::UnknownAbstractNum { abstract_num_id: 7, .. }));
    assert!(generator.instances().is_empty());
}

fn preset_strategy() -> impl Strategy<Value = ListPreset> {
    prop::sample::select(ListPreset::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_levels_are_unique_and_in_range(
        presets in prop::collection::vec((preset_strategy(), 0usize..15), 1..6)
    ) {
        let mut generator = NumberingGenerator::new();
        for (preset, count) in &presets {
            let definition = generator.create_multilevel_list_with_levels(*preset, *count);
            generator.create_num_instance(definition.id).unwrap();
        }

        let parsed = parse(&generator.to_xml().unwrap());
        prop_assert_eq!(parsed.levels.len(), presets.len());
        for ilvls in parsed.levels.values() {
            prop_assert!(!ilvls.is_empty() && ilvls.len() <= 9);
            prop_assert!(ilvls.iter().all(|ilvl| (0..=8).contains(ilvl)));
            let unique: BTreeSet<_> = ilvls.iter().collect();
            prop_assert_eq!(unique.len(), ilvls.len());
        }
        let expected: Vec<u32> = (1..=presets.len() as u32).collect();
        prop_assert_eq!(parsed.num_ids, expected);
    }

    #[test]
    fn prop_restart_level_must_be_in_range(ilvl in -20i32..20, start in 0i64..100) {
        let mut generator = NumberingGenerator::new();
        let definition = generator.create_multilevel_list(ListPreset::Legal);
        let result = generator.create_restart_instance(definition.id, ilvl, start);
        if (0..=8).contains(&ilvl) {
            prop_assert!(result.is_ok());
            prop_assert!(parse(&generator.to_xml().unwrap()).num_ids.len() == 1);
        } else {
            prop_assert!(result.is_err());
            prop_assert!(generator.instances().is_empty());
        }
    }
}
