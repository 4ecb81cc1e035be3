//! Glyph alphabet for the rain.

use rand::{Rng, seq::SliceRandom};
use unicode_width::UnicodeWidthChar;

/// Characters used for matrix rain: half-width katakana, digits and hex
/// letters. Half-width forms keep every glyph inside one terminal cell.
pub const MATRIX_CHARS: &[char] = &[
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ',
    'ﾁ', 'ﾂ', 'ﾃ', 'ﾄ', 'ﾅ', 'ﾆ', 'ﾇ', 'ﾈ', 'ﾉ', 'ﾊ', 'ﾋ', 'ﾌ', 'ﾍ', 'ﾎ', 'ﾏ', 'ﾐ',
    'ﾑ', 'ﾒ', 'ﾓ', 'ﾔ', 'ﾕ', 'ﾖ', 'ﾗ', 'ﾘ', 'ﾙ', 'ﾚ', 'ﾛ', 'ﾜ', 'ｦ', 'ﾝ', '0', '1',
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

/// Immutable set of glyphs the rain draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSet {
    glyphs: Vec<char>,
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self {
            glyphs: MATRIX_CHARS.to_vec(),
        }
    }
}

impl GlyphSet {
    /// Build an alphabet from a string. Control characters and glyphs wider
    /// than one cell are dropped; if nothing is left the default set is used.
    pub fn from_chars(chars: &str) -> Self {
        let glyphs: Vec<char> = chars
            .chars()
            .filter(|c| !c.is_control() && c.width() == Some(1))
            .collect();
        if glyphs.is_empty() {
            tracing::warn!(chars, "no usable single-width glyphs, using default alphabet");
            return Self::default();
        }
        Self { glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn contains(&self, glyph: char) -> bool {
        self.glyphs.contains(&glyph)
    }

    /// Pick one glyph uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.glyphs.choose(rng).copied().unwrap_or(' ')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_default_glyphs_are_single_width() {
        let set = GlyphSet::default();
        assert_eq!(set.len(), MATRIX_CHARS.len());
        assert!(MATRIX_CHARS.iter().all(|c| c.width() == Some(1)));
    }

    #[test]
    fn test_from_chars_drops_wide_and_control_chars() {
        let set = GlyphSet::from_chars("アa\tb");
        assert_eq!(set.len(), 2);
        assert!(set.contains('a'));
        assert!(set.contains('b'));
        assert!(!set.contains('ア'));
    }

    #[test]
    fn test_from_chars_falls_back_to_default() {
        assert_eq!(GlyphSet::from_chars("アイ"), GlyphSet::default());
    }

    #[test]
    fn test_pick_stays_in_alphabet() {
        let set = GlyphSet::from_chars("01");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(set.contains(set.pick(&mut rng)));
        }
    }
}
