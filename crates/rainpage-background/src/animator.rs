//! Background animator lifecycle: sizing, frame pacing and stop.

use rainpage_core::{Rgb, Viewport};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    chars::GlyphSet,
    matrix::{self, FrameParams},
    surface::{CellSurface, Surface},
};

/// Tunable rain settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RainSettings {
    pub cell_size: u32,
    pub fade_alpha: f32,
    pub reset_probability: f64,
    pub frame_rate: u32,
    pub glyph_color: Rgb,
    pub fade_color: Rgb,
    pub glyphs: GlyphSet,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            cell_size: 1,
            fade_alpha: 0.05,
            reset_probability: 0.025,
            frame_rate: 30,
            glyph_color: Rgb::new(0xe6, 0x00, 0x7a),
            fade_color: Rgb::new(0x0a, 0x0a, 0x0f),
            glyphs: GlyphSet::default(),
        }
    }
}

impl RainSettings {
    /// Milliseconds between frames.
    pub fn frame_interval_ms(&self) -> u64 {
        (1000 / u64::from(self.frame_rate.max(1))).max(1)
    }

    fn frame_params(&self) -> FrameParams {
        FrameParams {
            cell_size: self.cell_size.max(1),
            fade_color: self.fade_color,
            fade_alpha: self.fade_alpha.clamp(0.0, 1.0),
            glyph_color: self.glyph_color,
            reset_probability: self.reset_probability.clamp(0.0, 1.0),
        }
    }
}

/// Owns the drawing surface, the column offsets and the frame cadence of
/// the falling-glyph background.
#[derive(Debug)]
pub struct BackgroundAnimator<S = CellSurface, R = StdRng> {
    surface: S,
    rng: R,
    settings: RainSettings,
    columns: Vec<u32>,
    running: bool,
    paused: bool,
    /// Time of the last rendered frame in milliseconds.
    last_frame_ms: Option<u64>,
}

impl BackgroundAnimator<CellSurface, StdRng> {
    /// Terminal animator seeded from the OS.
    pub fn for_terminal(settings: RainSettings, viewport: Viewport) -> Self {
        let surface = CellSurface::new(settings.fade_color);
        Self::new(surface, StdRng::from_entropy(), settings, viewport)
    }
}

impl<S: Surface, R: Rng> BackgroundAnimator<S, R> {
    /// Create an animator and size it to the viewport.
    pub fn new(surface: S, rng: R, settings: RainSettings, viewport: Viewport) -> Self {
        let mut animator = Self {
            surface,
            rng,
            settings,
            columns: Vec::new(),
            running: true,
            paused: false,
            last_frame_ms: None,
        };
        animator.init(viewport);
        animator
    }

    /// Size the surface to the viewport and restart every column. Called on
    /// construction and on every resize.
    pub fn init(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
        self.columns = matrix::init_columns(viewport, self.settings.cell_size.max(1));
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            columns = self.columns.len(),
            "initialized background"
        );
    }

    /// Paint one frame. No-op once stopped.
    pub fn render_frame(&mut self) {
        if !self.running {
            return;
        }
        let params = self.settings.frame_params();
        matrix::draw_frame(
            &mut self.columns,
            &mut self.surface,
            &mut self.rng,
            &self.settings.glyphs,
            &params,
        );
    }

    /// Render if a frame is due at `now_ms`. Returns whether a frame was drawn.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.running || self.paused {
            return false;
        }
        let interval = self.settings.frame_interval_ms();
        if self
            .last_frame_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < interval)
        {
            return false;
        }
        self.render_frame();
        self.last_frame_ms = Some(now_ms);
        true
    }

    /// Milliseconds until the next frame is due.
    pub fn time_until_next_frame(&self, now_ms: u64) -> u64 {
        match self.last_frame_ms {
            Some(last) => (last + self.settings.frame_interval_ms()).saturating_sub(now_ms),
            None => 0,
        }
    }

    /// End the animation for good and blank the surface.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!("stopping background");
        }
        self.running = false;
        self.surface.clear();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Freeze the current frame without discarding state.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_glyph_color(&mut self, color: Rgb) {
        self.settings.glyph_color = color;
    }

    pub fn settings(&self) -> &RainSettings {
        &self.settings
    }

    /// Current drop offset of every column.
    pub fn columns(&self) -> &[u32] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
