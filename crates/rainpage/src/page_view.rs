//! Draws the page document into a terminal buffer.

use rainpage_config::ThemeConfig;
use rainpage_core::Rgb;
use rainpage_effects::{
    Document, Element, PageLayout,
    effects::{ACTIVE_CLASS, CURSOR_CLASS, REVEAL_CLASS, VISIBLE_CLASS},
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

/// Cursor blink half-period.
const BLINK_MS: u64 = 500;
/// Opacity of timeline items that have not scrolled into view yet.
const PENDING_OPACITY: f32 = 0.35;
/// Brightness boost of a pulsing timeline marker.
const PULSE_BRIGHTNESS: f32 = 1.4;

/// Borrowed state needed to draw one page frame.
pub struct PageView<'a> {
    pub document: &'a Document,
    pub layout: &'a PageLayout,
    pub scroll_offset: u32,
    pub theme: &'a ThemeConfig,
    pub now_ms: u64,
}

impl PageView<'_> {
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        for (element, block) in self.document.elements().iter().zip(self.layout.blocks()) {
            if element.has_class(REVEAL_CLASS) && !element.has_class(ACTIVE_CLASS) {
                continue;
            }
            let shift = element.style.translate_y.round() as i64;
            let style = self.style_for(element);
            let last = block.lines.len().saturating_sub(1);

            for (i, line) in block.lines.iter().enumerate() {
                let row = i64::from(block.top) + i as i64 + shift - i64::from(self.scroll_offset);
                let Ok(row) = u16::try_from(row) else {
                    continue;
                };
                if row >= area.height {
                    continue;
                }
                let y = area.y + row;

                if let Some(shadow) = element.style.shadow {
                    let colors = [self.theme.accent, self.theme.glyph];
                    for ((dx, _), color) in shadow.into_iter().zip(colors) {
                        let dx = (dx / 2.0).round() as i64;
                        if let Ok(x) = u16::try_from(i64::from(area.x) + dx) {
                            let width = usize::from(area.right().saturating_sub(x));
                            buf.set_stringn(x, y, line, width, Style::new().fg(color.into()));
                        }
                    }
                }

                let mut text = line.clone();
                if i == last && element.has_class(CURSOR_CLASS) && (self.now_ms / BLINK_MS) % 2 == 0 {
                    text.push('_');
                }
                buf.set_stringn(area.x, y, &text, usize::from(area.width), style);
            }
        }
    }

    fn style_for(&self, element: &Element) -> Style {
        let theme = self.theme;
        let (color, modifier) = if element.has_class("glitch") || element.tag == "h1" {
            (theme.glyph, Modifier::BOLD)
        } else if element.has_class("section-title") || element.tag == "h2" {
            (theme.accent, Modifier::BOLD)
        } else if element.has_class("stat-number") {
            (theme.accent, Modifier::BOLD)
        } else if element.tag == "a" {
            (theme.accent, Modifier::UNDERLINED)
        } else if element.has_class("timeline-marker") {
            if element.style.pulse {
                (theme.glyph.scale(PULSE_BRIGHTNESS), Modifier::BOLD)
            } else {
                (theme.accent, Modifier::empty())
            }
        } else {
            (theme.text, Modifier::empty())
        };

        let mut opacity = element.style.opacity;
        if element.has_class("timeline-item") && !element.has_class(VISIBLE_CLASS) {
            opacity *= PENDING_OPACITY;
        }
        let color = fade(theme.background, color, opacity);
        Style::new().fg(color.into()).add_modifier(modifier)
    }
}

fn fade(background: Rgb, color: Rgb, opacity: f32) -> Rgb {
    background.mix(color, opacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    const PAGE: &str = r#"
[[element]]
tag = "h1"
classes = ["glitch"]
text = "TITLE"

[[element]]
classes = ["stat-card", "reveal"]
text = "hidden"

[[element]]
classes = ["typewriter", "cursor-blink"]
text = "typed"
"#;

    fn render(document: &Document, scroll_offset: u32, now_ms: u64) -> Buffer {
        let theme = ThemeConfig::default();
        let layout = PageLayout::compute(document, 20);
        let area = Rect::new(0, 0, 20, 6);
        let mut buf = Buffer::empty(area);
        PageView {
            document,
            layout: &layout,
            scroll_offset,
            theme: &theme,
            now_ms,
        }
        .render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect::<String>()
    }

    #[test]
    fn test_hidden_until_revealed() {
        let mut doc = Document::from_toml_str(PAGE).unwrap();
        let buf = render(&doc, 0, 0);
        assert!(row(&buf, 0).starts_with("TITLE"));
        assert_eq!(row(&buf, 2).trim(), "");

        doc.add_class(1, ACTIVE_CLASS);
        let buf = render(&doc, 0, 0);
        assert!(row(&buf, 2).starts_with("hidden"));
    }

    #[test]
    fn test_cursor_blinks() {
        let doc = Document::from_toml_str(PAGE).unwrap();
        assert!(row(&render(&doc, 0, 0), 4).starts_with("typed_"));
        assert!(!row(&render(&doc, 0, 500), 4).starts_with("typed_"));
    }

    #[test]
    fn test_scroll_offset_moves_rows_up() {
        let doc = Document::from_toml_str(PAGE).unwrap();
        let buf = render(&doc, 4, 0);
        assert!(row(&buf, 0).starts_with("typed"));
    }

    #[test]
    fn test_pulsing_marker_is_brightened() {
        let mut doc = Document::from_toml_str(
            r#"
[[element]]
classes = ["timeline-marker"]
text = "o"
"#,
        )
        .unwrap();
        let buf = render(&doc, 0, 0);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(0x00, 0xb2, 0xff));

        doc.element_mut(0).unwrap().style.pulse = true;
        let buf = render(&doc, 0, 0);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(255, 0, 171));
        assert!(buf[(0, 0)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_title_uses_glyph_colour() {
        let doc = Document::from_toml_str(PAGE).unwrap();
        let buf = render(&doc, 0, 0);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(0xe6, 0x00, 0x7a));
        assert!(buf[(0, 0)].modifier.contains(Modifier::BOLD));
    }
}
