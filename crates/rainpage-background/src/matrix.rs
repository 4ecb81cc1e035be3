//! Matrix rain columns.
//!
//! Each column tracks a single integer drop offset, measured in cells. Every
//! frame draws one fresh glyph at the drop position and advances it; the fade
//! overlay painted before the glyphs turns older glyphs into a trail.

use rainpage_core::{Rgb, Viewport};
use rand::Rng;

use crate::{chars::GlyphSet, surface::Surface};

/// Offset every column starts from.
pub const START_OFFSET: u32 = 1;

/// Per-frame drawing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub cell_size: u32,
    pub fade_color: Rgb,
    pub fade_alpha: f32,
    pub glyph_color: Rgb,
    pub reset_probability: f64,
}

/// Number of columns that fit in the viewport.
pub fn column_count(viewport: Viewport, cell_size: u32) -> usize {
    if cell_size == 0 {
        return 0;
    }
    (viewport.width / cell_size) as usize
}

/// Fresh column offsets for the given viewport.
pub fn init_columns(viewport: Viewport, cell_size: u32) -> Vec<u32> {
    vec![START_OFFSET; column_count(viewport, cell_size)]
}

/// Paint one frame and advance every column.
pub fn draw_frame<S, R>(
    columns: &mut [u32],
    surface: &mut S,
    rng: &mut R,
    glyphs: &GlyphSet,
    params: &FrameParams,
) where
    S: Surface + ?Sized,
    R: Rng + ?Sized,
{
    surface.fill_translucent(params.fade_color, params.fade_alpha);

    let height = u64::from(surface.viewport().height);
    let cell = params.cell_size;

    for (i, offset) in columns.iter_mut().enumerate() {
        let glyph = glyphs.pick(rng);
        let x = (i as u32).saturating_mul(cell);
        let y = offset.saturating_mul(cell);
        surface.draw_glyph(glyph, x, y, params.glyph_color);

        // Columns past the bottom restart one at a time rather than in lockstep.
        let past_bottom = u64::from(*offset) * u64::from(cell) > height;
        if past_bottom && rng.gen_bool(params.reset_probability) {
            *offset = 0;
        }
        *offset = offset.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CellSurface;
    use rand::{SeedableRng, rngs::StdRng};

    fn params(reset_probability: f64) -> FrameParams {
        FrameParams {
            cell_size: 1,
            fade_color: Rgb::new(10, 10, 15),
            fade_alpha: 0.05,
            glyph_color: Rgb::new(230, 0, 122),
            reset_probability,
        }
    }

    #[test]
    fn test_column_count_floors() {
        assert_eq!(column_count(Viewport::new(140, 100), 14), 10);
        assert_eq!(column_count(Viewport::new(153, 100), 14), 10);
        assert_eq!(column_count(Viewport::new(13, 100), 14), 0);
        assert_eq!(column_count(Viewport::new(80, 24), 0), 0);
    }

    #[test]
    fn test_init_columns_start_at_one() {
        assert_eq!(init_columns(Viewport::new(140, 100), 14), vec![1; 10]);
        assert!(init_columns(Viewport::new(0, 0), 14).is_empty());
    }

    #[test]
    fn test_first_frame_draws_top_row() {
        let viewport = Viewport::new(6, 4);
        let mut surface = CellSurface::new(Rgb::BLACK);
        surface.resize(viewport);
        let mut columns = init_columns(viewport, 1);
        let mut rng = StdRng::seed_from_u64(1);

        draw_frame(&mut columns, &mut surface, &mut rng, &GlyphSet::default(), &params(0.0));

        assert_eq!(columns, vec![2; 6]);
        for x in 0..6 {
            assert!(!surface.cell(x, 0).unwrap().is_blank());
            assert!(surface.cell(x, 1).unwrap().is_blank());
        }
    }

    #[test]
    fn test_certain_reset_restarts_after_bottom() {
        let viewport = Viewport::new(2, 3);
        let mut surface = CellSurface::new(Rgb::BLACK);
        surface.resize(viewport);
        let mut columns = init_columns(viewport, 1);
        let mut rng = StdRng::seed_from_u64(2);
        let glyphs = GlyphSet::default();

        // Offsets 1, 2, 3 are inside; offset 4 is past the bottom and resets.
        for expected in [2, 3, 4, 1] {
            draw_frame(&mut columns, &mut surface, &mut rng, &glyphs, &params(1.0));
            assert_eq!(columns, vec![expected; 2]);
        }
    }
}
