//! Conversions between author-facing display levels (1..=9) and level indices (0..=8)

/// Levels a single abstract numbering definition may hold
pub const MAX_LEVELS: usize = 9;

/// Highest level index the format accepts
pub const MAX_ILVL: i32 = 8;

/// Display level shown to authors → 0-based level index, clamped to 0..=8
pub fn display_level_to_ilvl(display_level: i64) -> i32 {
    display_level.saturating_sub(1).clamp(0, MAX_ILVL as i64) as i32
}

/// 0-based level index → display level, clamped to 1..=9
pub fn ilvl_to_display_level(ilvl: i64) -> i32 {
    ilvl.saturating_add(1).clamp(1, MAX_LEVELS as i64) as i32
}

/// Whether `ilvl` is a valid level index
pub fn is_valid_ilvl(ilvl: i64) -> bool {
    (0..=MAX_ILVL as i64).contains(&ilvl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_level_conversion_clamps() {
        assert_eq!(display_level_to_ilvl(1), 0);
        assert_eq!(display_level_to_ilvl(9), 8);
        assert_eq!(display_level_to_ilvl(0), 0);
        assert_eq!(display_level_to_ilvl(42), 8);
        assert_eq!(display_level_to_ilvl(i64::MIN), 0);
    }

    #[test]
    fn test_ilvl_conversion_clamps() {
        assert_eq!(ilvl_to_display_level(0), 1);
        assert_eq!(ilvl_to_display_level(8), 9);
        assert_eq!(ilvl_to_display_level(-3), 1);
        assert_eq!(ilvl_to_display_level(i64::MAX), 9);
    }
}
