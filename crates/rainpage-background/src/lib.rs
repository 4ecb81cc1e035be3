//! Falling-glyph background for the rainpage memoir page.
//!
//! The animator keeps one drop offset per column of a glyph grid. Every frame
//! it fades the previous frame with a translucent overlay, draws one random
//! glyph per column and advances the drops. Columns that fall past the bottom
//! restart at random, which staggers them.

mod animator;
mod chars;
mod matrix;
mod surface;

pub use animator::{BackgroundAnimator, RainSettings};
pub use chars::{GlyphSet, MATRIX_CHARS};
pub use matrix::{FrameParams, START_OFFSET, column_count, draw_frame, init_columns};
pub use surface::{Cell, CellSurface, Surface};
