use std::collections::HashSet;
use std::fmt;

use crate::AsciiError;

/// Twelve glyphs ordered from lightest to darkest ink.
pub const DEFAULT_RAMP: &str = " .:-=+*oO#%@";

/// Ordered glyph lookup table; index 0 is the lightest glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ramp {
    chars: Vec<char>,
}

impl Ramp {
    /// Builds a ramp from a literal string, ordered lightest to darkest.
    ///
    /// Rejects empty strings and strings that repeat a character.
    pub fn new(chars: impl Into<String>) -> Result<Self, AsciiError> {
        Self::from_chars(chars.into().chars().collect())
    }

    pub(crate) fn from_chars(chars: Vec<char>) -> Result<Self, AsciiError> {
        if chars.is_empty() {
            return Err(AsciiError::InvalidRamp("ramp must contain at least one character".into()));
        }

        let mut seen = HashSet::with_capacity(chars.len());
        if let Some(dup) = chars.iter().find(|ch| !seen.insert(**ch)) {
            let message = format!("character {dup:?} appears more than once");
            return Err(AsciiError::InvalidRamp(message));
        }

        Ok(Self { chars })
    }

    pub fn standard() -> Self {
        Self { chars: DEFAULT_RAMP.chars().collect() }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Maps a brightness in [0.0, 1.0] to a ramp index, rounding half away from zero.
    pub fn index_for(&self, brightness: f32) -> usize {
        let levels = (self.chars.len() - 1) as f32;
        let idx = (brightness.clamp(0.0, 1.0) * levels).round() as usize;
        idx.min(self.chars.len() - 1)
    }

    pub fn glyph_for(&self, brightness: f32) -> char {
        self.chars[self.index_for(brightness)]
    }
}

impl Default for Ramp {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Ramp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|ch| write!(f, "{ch}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_ramp_has_twelve_glyphs_starting_with_space() {
        let ramp = Ramp::standard();
        assert_eq!(ramp.len(), 12);
        assert_eq!(ramp.chars()[0], ' ');
        assert_eq!(ramp.chars()[11], '@');
    }

    #[test]
    fn brightness_bounds_hit_first_and_last_index() {
        let ramp = Ramp::standard();
        assert_eq!(ramp.index_for(0.0), 0);
        assert_eq!(ramp.index_for(1.0), ramp.len() - 1);
    }

    #[test]
    fn index_rounds_half_away_from_zero() {
        // 0.5 * 2 levels = 1.0, 0.25 * 2 = 0.5 -> 1
        let ramp = Ramp::new("abc").unwrap();
        assert_eq!(ramp.index_for(0.25), 1);
        assert_eq!(ramp.index_for(0.24), 0);
        assert_eq!(ramp.index_for(0.75), 2);
    }

    #[test]
    fn single_glyph_ramp_always_maps_to_it() {
        let ramp = Ramp::new("#").unwrap();
        assert_eq!(ramp.glyph_for(0.0), '#');
        assert_eq!(ramp.glyph_for(1.0), '#');
    }

    #[test]
    fn rejects_empty_and_duplicate_ramps() {
        assert!(matches!(Ramp::new(""), Err(AsciiError::InvalidRamp(_))));
        assert!(matches!(Ramp::new(" .:."), Err(AsciiError::InvalidRamp(_))));
    }

    #[test]
    fn display_round_trips_literal() {
        assert_eq!(Ramp::standard().to_string(), DEFAULT_RAMP);
    }
}
