//! Visibility observer: reports elements crossing a visible-ratio threshold.

use crate::layout::PageLayout;

/// The scrolled window onto the page, in rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollViewport {
    pub offset: u32,
    pub height: u32,
}

impl ScrollViewport {
    pub const fn new(offset: u32, height: u32) -> Self {
        Self { offset, height }
    }

    /// Fraction of the rows `top..top + height` inside the viewport.
    pub fn visible_ratio(&self, top: u32, height: u32) -> f32 {
        if height == 0 {
            return 0.0;
        }
        let start = top.max(self.offset);
        let end = (top + height).min(self.offset + self.height);
        end.saturating_sub(start) as f32 / height as f32
    }
}

/// One change reported by [`VisibilityObserver::poll`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    pub element: usize,
    pub ratio: f32,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone)]
struct Target {
    element: usize,
    /// Last reported state; `None` until the first poll.
    intersecting: Option<bool>,
}

/// Watches a set of elements. The first poll after `observe` reports the
/// element whatever its state; later polls report only changes.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f32,
    targets: Vec<Target>,
}

impl VisibilityObserver {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            targets: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn observe(&mut self, element: usize) {
        if !self.is_observing(element) {
            self.targets.push(Target {
                element,
                intersecting: None,
            });
        }
    }

    pub fn unobserve(&mut self, element: usize) {
        self.targets.retain(|t| t.element != element);
    }

    pub fn is_observing(&self, element: usize) -> bool {
        self.targets.iter().any(|t| t.element == element)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Entries for targets whose state changed since the last poll.
    pub fn poll(&mut self, layout: &PageLayout, viewport: ScrollViewport) -> Vec<VisibilityEntry> {
        let mut entries = Vec::new();
        for target in &mut self.targets {
            let Some(block) = layout.block(target.element) else {
                continue;
            };
            let ratio = viewport.visible_ratio(block.top, block.height);
            let is_intersecting = ratio > 0.0 && ratio >= self.threshold;
            if target.intersecting != Some(is_intersecting) {
                target.intersecting = Some(is_intersecting);
                entries.push(VisibilityEntry {
                    element: target.element,
                    ratio,
                    is_intersecting,
                });
            }
        }
        entries
    }
}
