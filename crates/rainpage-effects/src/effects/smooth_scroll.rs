//! Eased scrolling to in-page anchors.

use crate::{document::Document, layout::PageLayout};

pub const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScrollAnimation {
    from: u32,
    to: u32,
    start_ms: u64,
}

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    anchors: Vec<usize>,
    duration_ms: u64,
    animation: Option<ScrollAnimation>,
}

impl SmoothScroll {
    pub fn new(document: &Document, duration_ms: u64) -> Self {
        Self {
            anchors: document.query(ANCHOR_SELECTOR),
            duration_ms,
            animation: None,
        }
    }

    /// Anchor elements in document order.
    pub fn anchors(&self) -> &[usize] {
        &self.anchors
    }

    /// Start scrolling toward the target of the `n`-th anchor. Returns false
    /// when there is no such anchor or its target is missing.
    pub fn activate(
        &mut self,
        n: usize,
        document: &Document,
        layout: &PageLayout,
        current_offset: u32,
        now_ms: u64,
    ) -> bool {
        let Some(&anchor) = self.anchors.get(n) else {
            return false;
        };
        let Some(href) = document.element(anchor).and_then(|el| el.attr("href")) else {
            return false;
        };
        let id = href.trim_start_matches('#');
        let Some(target) = document.find_by_id(id).and_then(|i| layout.block(i)) else {
            tracing::debug!(href, "anchor target not found");
            return false;
        };
        self.animation = Some(ScrollAnimation {
            from: current_offset,
            to: target.top,
            start_ms: now_ms,
        });
        true
    }

    /// Offset the viewport should be at now, while a scroll is in progress.
    pub fn update(&mut self, now_ms: u64) -> Option<u32> {
        let animation = self.animation?;
        let elapsed = now_ms.saturating_sub(animation.start_ms);
        if elapsed >= self.duration_ms {
            self.animation = None;
            return Some(animation.to);
        }
        let t = ease_in_out_cubic(elapsed as f64 / self.duration_ms as f64);
        let from = f64::from(animation.from);
        let to = f64::from(animation.to);
        Some((from + (to - from) * t).round() as u32)
    }

    /// Abandon the current scroll, e.g. when the user scrolls manually.
    pub fn cancel(&mut self) {
        self.animation = None;
    }

    pub fn is_scrolling(&self) -> bool {
        self.animation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
[[element]]
tag = "a"
text = "Timeline"
attrs = { href = "#timeline" }

[[element]]
tag = "a"
text = "Nowhere"
attrs = { href = "#missing" }

[[element]]
tag = "a"
text = "External"
attrs = { href = "https://example.com" }

[[element]]
text = "filler"

[[element]]
id = "timeline"
text = "2019"
"##;

    fn setup() -> (Document, PageLayout) {
        let doc = Document::from_toml_str(PAGE).unwrap();
        let layout = PageLayout::compute(&doc, 40);
        (doc, layout)
    }

    #[test]
    fn test_collects_in_page_anchors() {
        let (doc, _) = setup();
        assert_eq!(SmoothScroll::new(&doc, 400).anchors(), &[0, 1]);
    }

    #[test]
    fn test_scroll_eases_to_target_top() {
        let (doc, layout) = setup();
        let mut scroll = SmoothScroll::new(&doc, 400);
        assert!(scroll.activate(0, &doc, &layout, 0, 1_000));
        assert!(scroll.is_scrolling());

        let start = scroll.update(1_000).unwrap();
        let middle = scroll.update(1_200).unwrap();
        assert_eq!(start, 0);
        assert_eq!(middle, 4);
        assert_eq!(scroll.update(1_400), Some(8));
        assert!(!scroll.is_scrolling());
        assert_eq!(scroll.update(1_500), None);
    }

    #[test]
    fn test_missing_target_does_nothing() {
        let (doc, layout) = setup();
        let mut scroll = SmoothScroll::new(&doc, 400);
        assert!(!scroll.activate(1, &doc, &layout, 0, 0));
        assert!(!scroll.activate(7, &doc, &layout, 0, 0));
        assert!(!scroll.is_scrolling());
    }

    #[test]
    fn test_zero_duration_jumps() {
        let (doc, layout) = setup();
        let mut scroll = SmoothScroll::new(&doc, 0);
        scroll.activate(0, &doc, &layout, 3, 0);
        assert_eq!(scroll.update(0), Some(8));
    }

    #[test]
    fn test_cancel() {
        let (doc, layout) = setup();
        let mut scroll = SmoothScroll::new(&doc, 400);
        scroll.activate(0, &doc, &layout, 0, 0);
        scroll.cancel();
        assert_eq!(scroll.update(100), None);
    }
}
