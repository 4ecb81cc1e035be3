use crate::Rgb;

/// Glyph colour presets for the background rain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorTheme {
    #[default]
    Magenta,
    Cyan,
    Green,
    Amber,
    White,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Magenta => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Amber,
            ColorTheme::Amber => ColorTheme::White,
            ColorTheme::White => ColorTheme::Magenta,
        }
    }

    /// Glyph colour for this theme.
    pub fn rgb(self) -> Rgb {
        match self {
            ColorTheme::Magenta => Rgb::new(0xe6, 0x00, 0x7a),
            ColorTheme::Cyan => Rgb::new(0x00, 0xb2, 0xff),
            ColorTheme::Green => Rgb::new(0x00, 0xff, 0x88),
            ColorTheme::Amber => Rgb::new(0xff, 0xb0, 0x00),
            ColorTheme::White => Rgb::new(0xe8, 0xe8, 0xf0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Magenta => "magenta",
            ColorTheme::Cyan => "cyan",
            ColorTheme::Green => "green",
            ColorTheme::Amber => "amber",
            ColorTheme::White => "white",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_returns_to_start() {
        let mut theme = ColorTheme::default();
        for _ in 0..5 {
            theme = theme.next();
        }
        assert_eq!(theme, ColorTheme::Magenta);
        assert_eq!(ColorTheme::Magenta.next(), ColorTheme::Cyan);
    }

    #[test]
    fn test_default_matches_page_accent() {
        assert_eq!(ColorTheme::default().rgb().to_string(), "#e6007a");
    }
}
