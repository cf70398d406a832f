//! Built-in list styles and the custom legal format builder

use std::str::FromStr;

use super::error::NumberingError;
use super::levels::MAX_LEVELS;
use super::model::{LevelConfig, MultiLevelType, NumberFormat};

/// Glyphs used by the bulleted preset, one per level (cycled)
pub const BULLET_GLYPHS: [&str; 3] = ["•", "◦", "▪"];

const BULLET_FONT: &str = "Arial";
const INDENT_STEP: u32 = 720;
const HANGING: u32 = 360;

/// Named list styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListPreset {
    /// 1 / 1.1 / 1.1.1 ...
    Legal,
    /// I / A / 1 / a / i / (1) / (a) / (i) / (A)
    Outline,
    /// Flat decimal list
    Numbered,
    Bulleted,
    /// 1 / a / i, repeating
    Hybrid,
    /// Legal decimals for three levels, outline forms below
    Mixed,
}

impl ListPreset {
    pub const ALL: [ListPreset; 6] = [
        ListPreset::Legal,
        ListPreset::Outline,
        ListPreset::Numbered,
        ListPreset::Bulleted,
        ListPreset::Hybrid,
        ListPreset::Mixed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ListPreset::Legal => "legal",
            ListPreset::Outline => "outline",
            ListPreset::Numbered => "numbered",
            ListPreset::Bulleted => "bulleted",
            ListPreset::Hybrid => "hybrid",
            ListPreset::Mixed => "mixed",
        }
    }

    pub fn multi_level_type(self) -> MultiLevelType {
        match self {
            ListPreset::Numbered | ListPreset::Bulleted => MultiLevelType::HybridMultilevel,
            _ => MultiLevelType::Multilevel,
        }
    }

    /// Level configurations for the first `count` levels (clamped to 1..=9)
    pub fn levels(self, count: usize) -> Vec<LevelConfig> {
        (0..count.clamp(1, MAX_LEVELS))
            .map(|ilvl| self.level(ilvl))
            .collect()
    }

    fn level(self, ilvl: usize) -> LevelConfig {
        let n = ilvl + 1;
        let left = INDENT_STEP * n as u32;
        let level = |fmt: NumberFormat, text: String| {
            LevelConfig::new(ilvl as i32, fmt, text).with_indent(left, HANGING)
        };

        match self {
            ListPreset::Legal => {
                level(NumberFormat::Decimal, ancestor_chain(n)).with_indent(left, INDENT_STEP)
            }
            ListPreset::Outline => {
                const FORMATS: [NumberFormat; MAX_LEVELS] = [
                    NumberFormat::UpperRoman,
                    NumberFormat::UpperLetter,
                    NumberFormat::Decimal,
                    NumberFormat::LowerLetter,
                    NumberFormat::LowerRoman,
                    NumberFormat::Decimal,
                    NumberFormat::LowerLetter,
                    NumberFormat::LowerRoman,
                    NumberFormat::UpperLetter,
                ];
                let text = if ilvl < 5 {
                    format!("%{}.", n)
                } else {
                    format!("(%{})", n)
                };
                level(FORMATS[ilvl], text)
            }
            ListPreset::Numbered => level(NumberFormat::Decimal, format!("%{}.", n)),
            ListPreset::Bulleted => {
                let mut config = level(
                    NumberFormat::Bullet,
                    BULLET_GLYPHS[ilvl % BULLET_GLYPHS.len()].to_string(),
                );
                config.bullet_font = Some(BULLET_FONT.to_string());
                config
            }
            ListPreset::Hybrid => {
                const FORMATS: [NumberFormat; 3] = [
                    NumberFormat::Decimal,
                    NumberFormat::LowerLetter,
                    NumberFormat::LowerRoman,
                ];
                level(FORMATS[ilvl % FORMATS.len()], format!("%{}.", n))
            }
            ListPreset::Mixed => match ilvl {
                0..=2 => level(NumberFormat::Decimal, format!("{}.", ancestor_chain(n))),
                3 => level(NumberFormat::LowerLetter, format!("(%{})", n)),
                4 => level(NumberFormat::LowerRoman, format!("(%{})", n)),
                5 => level(NumberFormat::UpperLetter, format!("(%{})", n)),
                6 => level(NumberFormat::UpperRoman, format!("%{}.", n)),
                7 => level(NumberFormat::LowerLetter, format!("%{}.", n)),
                _ => level(NumberFormat::LowerRoman, format!("%{}.", n)),
            },
        }
    }
}

impl FromStr for ListPreset {
    type Err = NumberingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ListPreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == name)
            .ok_or_else(|| NumberingError::UnknownPreset(s.to_string()))
    }
}

/// "%1.%2.…%n"
fn ancestor_chain(n: usize) -> String {
    (1..=n)
        .map(|k| format!("%{}", k))
        .collect::<Vec<_>>()
        .join(".")
}

/// What follows (or surrounds) the number in a custom legal format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuffixStyle {
    #[default]
    Period,
    Paren,
    Colon,
    None,
    /// "(1.2)"
    Parenthesized,
}

impl SuffixStyle {
    fn apply(self, body: &str) -> String {
        match self {
            SuffixStyle::Period => format!("{}.", body),
            SuffixStyle::Paren => format!("{})", body),
            SuffixStyle::Colon => format!("{}:", body),
            SuffixStyle::None => body.to_string(),
            SuffixStyle::Parenthesized => format!("({})", body),
        }
    }
}

/// Options for [`crate::numbering::NumberingGenerator::create_custom_legal_format`]
#[derive(Debug, Clone, PartialEq)]
pub struct CustomLegalOptions {
    pub name: Option<String>,
    /// Clamped to 1..=9
    pub level_count: usize,
    /// Start value per level; missing entries start at 1
    pub start_values: Vec<i64>,
    pub suffix: SuffixStyle,
    /// Text placed before the top-level number, e.g. "Article "
    pub prefix: Option<String>,
    /// Link levels 0..=5 to Heading1..Heading6
    pub link_headings: bool,
    /// Mark every level below the first to restart after its parent
    pub restart_after_parent: bool,
}

impl Default for CustomLegalOptions {
    fn default() -> Self {
        Self {
            name: None,
            level_count: MAX_LEVELS,
            start_values: Vec::new(),
            suffix: SuffixStyle::Period,
            prefix: None,
            link_headings: false,
            restart_after_parent: false,
        }
    }
}

impl CustomLegalOptions {
    pub(crate) fn levels(&self) -> Vec<LevelConfig> {
        let count = self.level_count.clamp(1, MAX_LEVELS);
        (0..count)
            .map(|ilvl| {
                let n = ilvl + 1;
                let mut text = self.suffix.apply(&ancestor_chain(n));
                if ilvl == 0 {
                    if let Some(prefix) = &self.prefix {
                        text = format!("{}{}", prefix, text);
                    }
                }
                let mut level = LevelConfig::new(
                    ilvl as i32,
                    NumberFormat::Decimal,
                    sanitize_level_text(&text),
                )
                .with_indent(INDENT_STEP * n as u32, INDENT_STEP);
                level.start = Some(self.start_values.get(ilvl).copied().unwrap_or(1));
                if self.link_headings && ilvl <= 5 {
                    level.p_style = Some(format!("Heading{}", n));
                }
                if self.restart_after_parent && ilvl > 0 {
                    level.restart_after = Some(ilvl as i32 - 1);
                }
                level
            })
            .collect()
    }
}

/// Strip everything outside the level-text allow-list: word characters,
/// whitespace, `%`, parentheses, `.`, `:`, `-` and the bullet glyphs.
pub fn sanitize_level_text(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            c.is_alphanumeric()
                || c == '_'
                || c.is_whitespace()
                || matches!(c, '%' | '(' | ')' | '.' | ':' | '-')
                || BULLET_GLYPHS.iter().any(|glyph| glyph.starts_with(c))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_level_text_chains_ancestors() {
        let levels = ListPreset::Legal.levels(4);
        assert_eq!(levels.len(), 4);
        assert_eq!(levels[0].level_text, "%1");
        assert_eq!(levels[3].level_text, "%1.%2.%3.%4");
    }

    #[test]
    fn test_level_count_is_clamped() {
        assert_eq!(ListPreset::Numbered.levels(0).len(), 1);
        assert_eq!(ListPreset::Numbered.levels(40).len(), 9);
    }

    #[test]
    fn test_bullets_cycle_glyphs() {
        let levels = ListPreset::Bulleted.levels(4);
        assert_eq!(levels[0].level_text, "•");
        assert_eq!(levels[1].level_text, "◦");
        assert_eq!(levels[3].level_text, "•");
        assert!(levels.iter().all(|l| l.num_fmt == NumberFormat::Bullet));
    }

    #[test]
    fn test_mixed_switches_after_three_levels() {
        let levels = ListPreset::Mixed.levels(9);
        assert_eq!(levels[2].level_text, "%1.%2.%3.");
        assert_eq!(levels[3].level_text, "(%4)");
        assert_eq!(levels[3].num_fmt, NumberFormat::LowerLetter);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("Legal".parse::<ListPreset>().unwrap(), ListPreset::Legal);
        assert!(matches!(
            "roman".parse::<ListPreset>(),
            Err(NumberingError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_custom_suffix_styles() {
        let options = CustomLegalOptions {
            level_count: 2,
            suffix: SuffixStyle::Parenthesized,
            ..Default::default()
        };
        let levels = options.levels();
        assert_eq!(levels[1].level_text, "(%1.%2)");

        let options = CustomLegalOptions {
            level_count: 1,
            suffix: SuffixStyle::Colon,
            prefix: Some("Article ".to_string()),
            ..Default::default()
        };
        assert_eq!(options.levels()[0].level_text, "Article %1:");
    }

    #[test]
    fn test_sanitize_strips_markup() {
        assert_eq!(sanitize_level_text("%1.<b>\"x\"</b>"), "%1.bxb");
        assert_eq!(sanitize_level_text("Section %1 & %2"), "Section %1  %2");
        assert_eq!(sanitize_level_text("• (a) - 1:"), "• (a) - 1:");
    }
}
