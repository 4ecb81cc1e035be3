//! Drawing surfaces the rain paints onto.

use rainpage_core::{Rgb, Viewport};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Cells fainter than this are blanked by the fade overlay.
const MIN_VISIBLE_INTENSITY: f32 = 0.08;

/// A raster target sized to the viewport.
pub trait Surface {
    /// Resize the surface, discarding its contents.
    fn resize(&mut self, viewport: Viewport);

    /// Current surface size.
    fn viewport(&self) -> Viewport;

    /// Paint `color` over the whole surface with the given alpha.
    fn fill_translucent(&mut self, color: Rgb, alpha: f32);

    /// Draw a glyph whose baseline sits at `baseline`. A glyph occupies the
    /// unit row above its baseline, so a baseline of 0 is off-surface.
    fn draw_glyph(&mut self, glyph: char, x: u32, baseline: u32, color: Rgb);

    /// Blank the whole surface.
    fn clear(&mut self);
}

/// One terminal cell of a [`CellSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: Rgb,
    /// 1.0 right after drawing, decays with every fade.
    pub intensity: f32,
}

impl Cell {
    const BLANK: Cell = Cell {
        glyph: ' ',
        color: Rgb::BLACK,
        intensity: 0.0,
    };

    pub fn is_blank(&self) -> bool {
        self.glyph == ' '
    }
}

/// Terminal surface where one surface unit is one character cell.
#[derive(Debug, Clone)]
pub struct CellSurface {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    /// Colour of the last fade overlay; blank and fading cells tend to it.
    background: Rgb,
}

impl CellSurface {
    pub fn new(background: Rgb) -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            background,
        }
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Cell at the given position, if inside the surface.
    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Number of cells currently showing a glyph.
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_blank()).count()
    }

    /// Colour the cell shows once blended with the background.
    pub fn display_color(&self, cell: &Cell) -> Rgb {
        self.background.mix(cell.color, cell.intensity)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y as usize) * (self.width as usize) + x as usize)
    }
}

impl Surface for CellSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.width = viewport.width;
        self.height = viewport.height;
        self.cells = vec![Cell::BLANK; (viewport.width as usize) * (viewport.height as usize)];
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    fn fill_translucent(&mut self, color: Rgb, alpha: f32) {
        self.background = color;
        let keep = 1.0 - alpha.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            if cell.is_blank() {
                continue;
            }
            cell.intensity *= keep;
            if cell.intensity < MIN_VISIBLE_INTENSITY {
                *cell = Cell::BLANK;
            }
        }
    }

    fn draw_glyph(&mut self, glyph: char, x: u32, baseline: u32, color: Rgb) {
        let Some(row) = baseline.checked_sub(1) else {
            return;
        };
        if let Some(i) = self.index(x, row) {
            self.cells[i] = Cell {
                glyph,
                color,
                intensity: 1.0,
            };
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }
}

impl Widget for &CellSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = Color::from(self.background);
        for y in 0..area.height {
            for x in 0..area.width {
                let Some(cell) = self.cell(u32::from(x), u32::from(y)) else {
                    continue;
                };
                let style = if cell.is_blank() {
                    Style::new().bg(bg)
                } else {
                    Style::new().fg(self.display_color(cell).into()).bg(bg)
                };
                if let Some(target) = buf.cell_mut((area.x + x, area.y + y)) {
                    target.set_char(cell.glyph).set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb = Rgb::new(10, 10, 15);
    const PINK: Rgb = Rgb::new(230, 0, 122);

    fn surface(width: u32, height: u32) -> CellSurface {
        let mut surface = CellSurface::new(BG);
        surface.resize(Viewport::new(width, height));
        surface
    }

    #[test]
    fn test_baseline_maps_to_row_above() {
        let mut s = surface(4, 4);
        s.draw_glyph('A', 2, 1, PINK);
        assert_eq!(s.cell(2, 0).map(|c| c.glyph), Some('A'));

        s.draw_glyph('B', 0, 0, PINK);
        s.draw_glyph('C', 0, 5, PINK);
        s.draw_glyph('D', 9, 1, PINK);
        assert_eq!(s.lit_cells(), 1);
    }

    #[test]
    fn test_fade_decays_then_blanks() {
        let mut s = surface(1, 1);
        s.draw_glyph('x', 0, 1, PINK);
        s.fill_translucent(BG, 0.5);
        let cell = *s.cell(0, 0).unwrap();
        assert_eq!(cell.glyph, 'x');
        assert!((cell.intensity - 0.5).abs() < f32::EPSILON);
        assert_eq!(s.display_color(&cell), BG.mix(PINK, 0.5));

        for _ in 0..4 {
            s.fill_translucent(BG, 0.5);
        }
        assert!(s.cell(0, 0).unwrap().is_blank());
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut s = surface(3, 3);
        s.draw_glyph('x', 1, 1, PINK);
        s.resize(Viewport::new(5, 2));
        assert_eq!(s.viewport(), Viewport::new(5, 2));
        assert_eq!(s.lit_cells(), 0);
        assert!(s.cell(4, 1).is_some());
        assert!(s.cell(0, 2).is_none());
    }

    #[test]
    fn test_render_widget() {
        let mut s = surface(3, 2);
        s.draw_glyph('ｱ', 1, 2, PINK);
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        (&s).render(area, &mut buf);
        assert_eq!(buf[(1, 1)].symbol(), "ｱ");
        assert_eq!(buf[(1, 1)].fg, Color::Rgb(230, 0, 122));
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(10, 10, 15));
    }
}
