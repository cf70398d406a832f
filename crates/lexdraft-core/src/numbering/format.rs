//! Number rendering and render-time level counters

use super::levels::MAX_LEVELS;
use super::model::{AbstractNumDefinition, NumberFormat};

/// Render `n` in the given format.
///
/// Letters follow the word-processor convention: after `z` come `aa`, `bb`, ...
pub fn format_number(n: u32, format: NumberFormat) -> String {
    match format {
        NumberFormat::Decimal => n.to_string(),
        NumberFormat::UpperLetter => to_letters(n).to_uppercase(),
        NumberFormat::LowerLetter => to_letters(n),
        NumberFormat::UpperRoman => to_roman(n).to_uppercase(),
        NumberFormat::LowerRoman => to_roman(n),
        NumberFormat::Bullet | NumberFormat::None => String::new(),
    }
}

fn to_letters(n: u32) -> String {
    if n == 0 {
        return n.to_string();
    }
    let index = (n - 1) % 26;
    let repeat = (n - 1) / 26 + 1;
    let letter = char::from(b'a' + index as u8);
    std::iter::repeat(letter).take(repeat as usize).collect()
}

fn to_roman(n: u32) -> String {
    if n == 0 {
        return n.to_string();
    }
    const TABLE: [(u32, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut remaining = n;
    let mut out = String::new();
    for (value, numeral) in TABLE {
        while remaining >= value {
            out.push_str(numeral);
            remaining -= value;
        }
    }
    out
}

/// Per-level counters for one numbering instance during a render.
///
/// Advancing a level resets every deeper level, so the next deeper item
/// starts again from its definition's start value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelCounters {
    current: [Option<u32>; MAX_LEVELS],
}

impl LevelCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `ilvl` to its next value and return it
    pub fn advance(&mut self, definition: &AbstractNumDefinition, ilvl: usize) -> u32 {
        let ilvl = ilvl.min(MAX_LEVELS - 1);
        let next = match self.current[ilvl] {
            Some(value) => value.saturating_add(1),
            None => start_of(definition, ilvl),
        };
        self.current[ilvl] = Some(next);
        for deeper in self.current.iter_mut().skip(ilvl + 1) {
            *deeper = None;
        }
        next
    }

    /// Current value of `ilvl`, if that level has been used since its last reset
    pub fn current(&self, ilvl: usize) -> Option<u32> {
        self.current.get(ilvl).copied().flatten()
    }

    /// Expand the level text of `ilvl`, substituting `%k` with the formatted
    /// current value of level `k - 1`
    pub fn format_prefix(&self, definition: &AbstractNumDefinition, ilvl: usize) -> String {
        let Some(level) = definition.level(ilvl as i32) else {
            return self
                .current(ilvl)
                .map(|value| value.to_string())
                .unwrap_or_default();
        };

        let mut out = String::with_capacity(level.level_text.len());
        let mut chars = level.level_text.chars().peekable();
        while let Some(c) = chars.next() {
            let placeholder = match (c, chars.peek().and_then(|d| d.to_digit(10))) {
                ('%', Some(digit @ 1..=9)) => Some(digit as usize - 1),
                _ => None,
            };
            match placeholder {
                Some(ancestor) => {
                    chars.next();
                    let value = self
                        .current(ancestor)
                        .unwrap_or_else(|| start_of(definition, ancestor));
                    let format = definition
                        .level(ancestor as i32)
                        .map(|l| l.num_fmt)
                        .unwrap_or(NumberFormat::Decimal);
                    out.push_str(&format_number(value, format));
                }
                None => out.push(c),
            }
        }
        out
    }
}

fn start_of(definition: &AbstractNumDefinition, ilvl: usize) -> u32 {
    definition
        .level(ilvl as i32)
        .map(|level| level.start_value().clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::{ListPreset, NumberingGenerator};

    #[test]
    fn test_format_number_variants() {
        assert_eq!(format_number(4, NumberFormat::Decimal), "4");
        assert_eq!(format_number(1, NumberFormat::UpperLetter), "A");
        assert_eq!(format_number(26, NumberFormat::LowerLetter), "z");
        assert_eq!(format_number(28, NumberFormat::LowerLetter), "bb");
        assert_eq!(format_number(14, NumberFormat::UpperRoman), "XIV");
        assert_eq!(format_number(1994, NumberFormat::LowerRoman), "mcmxciv");
        assert_eq!(format_number(3, NumberFormat::Bullet), "");
    }

    #[test]
    fn test_counters_reset_deeper_levels() {
        let mut generator = NumberingGenerator::new();
        let legal = generator.create_multilevel_list(ListPreset::Legal);
        let mut counters = LevelCounters::new();

        counters.advance(&legal, 0);
        counters.advance(&legal, 1);
        counters.advance(&legal, 1);
        assert_eq!(counters.format_prefix(&legal, 1), "1.2");

        counters.advance(&legal, 0);
        assert_eq!(counters.current(1), None);
        counters.advance(&legal, 1);
        assert_eq!(counters.format_prefix(&legal, 1), "2.1");
    }

    #[test]
    fn test_outline_prefix_uses_level_formats() {
        let mut generator = NumberingGenerator::new();
        let outline = generator.create_multilevel_list(ListPreset::Outline);
        let mut counters = LevelCounters::new();
        counters.advance(&outline, 0);
        counters.advance(&outline, 0);
        counters.advance(&outline, 1);
        counters.advance(&outline, 2);
        counters.advance(&outline, 3);
        assert_eq!(counters.format_prefix(&outline, 0), "II.");
        assert_eq!(counters.format_prefix(&outline, 1), "A.");
        assert_eq!(counters.format_prefix(&outline, 3), "a.");
    }
}
