//! WordprocessingML serialization of numbering definitions
//!
//! Every attribute value written here goes through [`escape_xml`].

use super::error::NumberingError;
use super::levels::is_valid_ilvl;
use super::model::{AbstractNumDefinition, LevelConfig, NumInstance};
use super::validate::{validate_definition, validate_instance};

pub const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Replace `& < > " '` with their entity references
pub fn escape_xml(text: &str) -> String {
    quick_xml::escape::escape(text).into_owned()
}

/// Minimal indenting writer for the numbering fragment
struct XmlBuilder {
    out: String,
    depth: usize,
}

impl XmlBuilder {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn write_tag(&mut self, name: &str, attrs: &[(&str, String)], self_closing: bool) {
        self.out.push_str(&"  ".repeat(self.depth));
        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in attrs {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            self.out.push_str(&escape_xml(value));
            self.out.push('"');
        }
        self.out.push_str(if self_closing { "/>\n" } else { ">\n" });
    }

    fn open(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.write_tag(name, attrs, false);
        self.depth += 1;
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.write_tag(name, attrs, true);
    }

    fn val(&mut self, name: &str, value: impl ToString) {
        self.empty(name, &[("w:val", value.to_string())]);
    }

    fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.out.push_str(&"  ".repeat(self.depth));
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Serialize definitions followed by the instances that reference them.
///
/// Every definition and instance is validated first; the first structural
/// defect is returned and nothing is emitted.
pub fn serialize_numbering(
    definitions: &[AbstractNumDefinition],
    instances: &[NumInstance],
) -> Result<String, NumberingError> {
    for definition in definitions {
        validate_definition(definition)?;
    }
    for instance in instances {
        validate_instance(instance)?;
        if !definitions
            .iter()
            .any(|definition| definition.id == instance.abstract_num_id)
        {
            return Err(NumberingError::UnknownAbstractNum {
                num_id: instance.num_id,
                abstract_num_id: instance.abstract_num_id,
            });
        }
    }

    let mut xml = XmlBuilder::new();
    xml.out
        .push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
    xml.open("w:numbering", &[("xmlns:w", WORDML_NS.to_string())]);

    for definition in definitions {
        write_abstract_num(&mut xml, definition);
    }
    for instance in instances {
        write_num(&mut xml, instance);
    }

    xml.close("w:numbering");
    Ok(xml.finish())
}

fn write_abstract_num(xml: &mut XmlBuilder, definition: &AbstractNumDefinition) {
    xml.open(
        "w:abstractNum",
        &[("w:abstractNumId", definition.id.to_string())],
    );
    if let Some(name) = &definition.name {
        xml.val("w:name", name);
    }
    xml.val("w:multiLevelType", definition.multi_level_type.as_str());

    let mut levels: Vec<&LevelConfig> = definition.levels.iter().collect();
    levels.sort_by_key(|level| level.ilvl);
    for level in levels {
        write_level(xml, level);
    }
    xml.close("w:abstractNum");
}

fn write_level(xml: &mut XmlBuilder, level: &LevelConfig) {
    xml.open("w:lvl", &[("w:ilvl", level.ilvl.to_string())]);
    xml.val("w:start", level.start_value());
    xml.val("w:numFmt", level.num_fmt.as_str());
    if let Some(restart) = level.restart_after {
        // lvlRestart is 1-based
        xml.val("w:lvlRestart", restart + 1);
    }
    if let Some(style) = level.p_style.as_ref().filter(|_| level.ilvl <= 5) {
        xml.val("w:pStyle", style);
    }
    xml.val("w:lvlText", &level.level_text);
    if let Some(jc) = level.justification {
        xml.val("w:lvlJc", jc.as_str());
    }
    if let Some(indent) = level.indent {
        xml.open("w:pPr", &[]);
        xml.empty(
            "w:ind",
            &[
                ("w:left", indent.left.to_string()),
                ("w:hanging", indent.hanging.to_string()),
            ],
        );
        xml.close("w:pPr");
    }
    if let Some(font) = &level.bullet_font {
        xml.open("w:rPr", &[]);
        xml.empty(
            "w:rFonts",
            &[
                ("w:ascii", font.clone()),
                ("w:hAnsi", font.clone()),
                ("w:hint", "default".to_string()),
            ],
        );
        xml.close("w:rPr");
    }
    xml.close("w:lvl");
}

fn write_num(xml: &mut XmlBuilder, instance: &NumInstance) {
    xml.open("w:num", &[("w:numId", instance.num_id.to_string())]);
    xml.val("w:abstractNumId", instance.abstract_num_id);
    for item in &instance.overrides {
        xml.open("w:lvlOverride", &[("w:ilvl", item.ilvl.to_string())]);
        xml.val("w:startOverride", item.start);
        xml.close("w:lvlOverride");
    }
    xml.close("w:num");
}

/// The `<w:numPr>` snippet that attaches a paragraph to `num_id` at `ilvl`
pub fn generate_num_pr(num_id: u32, ilvl: i32) -> Result<String, NumberingError> {
    if !is_valid_ilvl(ilvl as i64) {
        return Err(NumberingError::InvalidLevel { ilvl: ilvl as i64 });
    }
    Ok(format!(
        "<w:numPr><w:ilvl w:val=\"{}\"/><w:numId w:val=\"{}\"/></w:numPr>",
        ilvl, num_id
    ))
}
