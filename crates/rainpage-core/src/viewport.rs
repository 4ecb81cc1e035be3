/// Size of the visible area, in surface units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<ratatui::layout::Rect> for Viewport {
    fn from(area: ratatui::layout::Rect) -> Self {
        Self::new(u32::from(area.width), u32::from(area.height))
    }
}
