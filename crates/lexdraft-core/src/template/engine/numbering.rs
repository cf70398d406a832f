//! Render-scoped state behind the numbering block helpers
//!
//! One value of [`NumberingState`] lives for exactly one render. Nested
//! `multilevel` blocks save and restore the enclosing list; `numbered` and
//! `bulleted` lists form a stack so `item` always belongs to the innermost one.

use crate::numbering::{
    display_level_to_ilvl, format_number, AbstractNumDefinition, LevelCounters, ListPreset,
    NumberingGenerator,
};
use crate::template::error::TemplateError;

const BULLET: &str = "•";

#[derive(Debug)]
pub(crate) struct MultilevelList {
    pub definition: AbstractNumDefinition,
    pub num_id: u32,
    pub counters: LevelCounters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Numbered,
    Bulleted,
}

#[derive(Debug)]
struct SimpleList {
    kind: ListKind,
    next: i64,
}

#[derive(Debug, Default)]
pub(crate) struct NumberingState {
    generator: NumberingGenerator,
    current: Option<MultilevelList>,
    lists: Vec<SimpleList>,
}

impl NumberingState {
    /// Start a multilevel list; returns the enclosing one for [`Self::end_multilevel`]
    pub fn begin_multilevel(
        &mut self,
        preset: ListPreset,
        line: usize,
    ) -> Result<Option<MultilevelList>, TemplateError> {
        let definition = self.generator.create_multilevel_list(preset);
        let instance = self
            .generator
            .create_num_instance(definition.id)
            .map_err(|err| TemplateError::Numbering {
                message: err.to_string(),
                line,
            })?;
        Ok(self.current.replace(MultilevelList {
            definition,
            num_id: instance.num_id,
            counters: LevelCounters::new(),
        }))
    }

    pub fn end_multilevel(&mut self, previous: Option<MultilevelList>) {
        self.current = previous;
    }

    /// Advance `display_level` (1-based) and return `(num_id, ilvl, prefix)`
    pub fn next_level(&mut self, display_level: i64, line: usize) -> Result<(u32, i32, String), TemplateError> {
        let list = self.current.as_mut().ok_or_else(|| TemplateError::Numbering {
            message: "{{#level}} used outside of {{#multilevel}}".to_string(),
            line,
        })?;
        let ilvl = display_level_to_ilvl(display_level);
        list.counters.advance(&list.definition, ilvl as usize);
        let prefix = list.counters.format_prefix(&list.definition, ilvl as usize);
        Ok((list.num_id, ilvl, prefix))
    }

    /// Current number at `display_level`, formatted the way the level is
    pub fn current_number(&self, display_level: i64, line: usize) -> Result<String, TemplateError> {
        let list = self.current.as_ref().ok_or_else(|| TemplateError::Numbering {
            message: "{{numbering}} used outside of {{#multilevel}}".to_string(),
            line,
        })?;
        let ilvl = display_level_to_ilvl(display_level);
        let format = list
            .definition
            .level(ilvl)
            .map(|level| level.num_fmt)
            .unwrap_or(crate::numbering::NumberFormat::Decimal);
        Ok(list
            .counters
            .current(ilvl as usize)
            .map(|value| format_number(value, format))
            .unwrap_or_default())
    }

    /// Name of the active multilevel definition
    #[cfg(test)]
    fn active_list(&self) -> Option<&str> {
        self.current
            .as_ref()
            .and_then(|list| list.definition.name.as_deref())
    }

    pub fn begin_list(&mut self, kind: ListKind, start: i64) {
        self.lists.push(SimpleList { kind, next: start });
    }

    pub fn end_list(&mut self) {
        self.lists.pop();
    }

    /// Marker for the next `item` of the innermost list
    pub fn next_item(&mut self, line: usize) -> Result<String, TemplateError> {
        let list = self.lists.last_mut().ok_or_else(|| TemplateError::Numbering {
            message: "{{#item}} used outside of {{#numbered}} or {{#bulleted}}".to_string(),
            line,
        })?;
        Ok(match list.kind {
            ListKind::Numbered => {
                let marker = format!("{}.", list.next);
                list.next += 1;
                marker
            }
            ListKind::Bulleted => BULLET.to_string(),
        })
    }

    /// `<w:numbering>` for every multilevel list rendered so far
    pub fn numbering_xml(&self, line: usize) -> Result<Option<String>, TemplateError> {
        if self.generator.definitions().is_empty() {
            return Ok(None);
        }
        self.generator
            .to_xml()
            .map(Some)
            .map_err(|err| TemplateError::Numbering {
                message: err.to_string(),
                line,
            })
    }
}
