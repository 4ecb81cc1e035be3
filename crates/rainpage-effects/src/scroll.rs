//! Page scroll offset.

use crate::observer::ScrollViewport;

/// Scroll position of the page, clamped to the content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset: u32,
    viewport_height: u32,
    content_height: u32,
}

impl ScrollState {
    pub fn new(viewport_height: u32, content_height: u32) -> Self {
        Self {
            offset: 0,
            viewport_height,
            content_height,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> u32 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn scroll_to(&mut self, offset: u32) {
        self.offset = offset.min(self.max_offset());
    }

    pub fn scroll_by(&mut self, delta: i64) {
        let target = (i64::from(self.offset) + delta).max(0);
        self.scroll_to(u32::try_from(target).unwrap_or(u32::MAX));
    }

    /// Update sizes after a resize or relayout, keeping the offset valid.
    pub fn set_dimensions(&mut self, viewport_height: u32, content_height: u32) {
        self.viewport_height = viewport_height;
        self.content_height = content_height;
        self.scroll_to(self.offset);
    }

    pub fn viewport(&self) -> ScrollViewport {
        ScrollViewport::new(self.offset, self.viewport_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_to_content() {
        let mut scroll = ScrollState::new(10, 25);
        scroll.scroll_by(100);
        assert_eq!(scroll.offset(), 15);
        scroll.scroll_by(-4);
        assert_eq!(scroll.offset(), 11);
        scroll.scroll_by(-100);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut scroll = ScrollState::new(30, 12);
        scroll.scroll_to(5);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_resize_keeps_offset_valid() {
        let mut scroll = ScrollState::new(10, 40);
        scroll.scroll_to(30);
        scroll.set_dimensions(20, 40);
        assert_eq!(scroll.offset(), 20);
        assert_eq!(scroll.viewport(), ScrollViewport::new(20, 20));
    }
}
