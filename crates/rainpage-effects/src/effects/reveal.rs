//! Scroll-triggered reveal classes for cards and timeline items.

use crate::{
    document::Document,
    layout::PageLayout,
    observer::{ScrollViewport, VisibilityObserver},
};

pub const REVEAL_SELECTOR: &str =
    ".stat-card, .timeline-item, .team-category, .network-card, .partner-card, .github-card";
pub const REVEAL_CLASS: &str = "reveal";
pub const ACTIVE_CLASS: &str = "active";
pub const REVEAL_THRESHOLD: f32 = 0.1;
/// Delay between reveals of entries in the same batch.
pub const STAGGER_MS: u64 = 50;

pub const TIMELINE_SELECTOR: &str = ".timeline-item";
pub const TIMELINE_MARKER_SELECTOR: &str = ".timeline-marker";
pub const VISIBLE_CLASS: &str = "visible";
pub const TIMELINE_THRESHOLD: f32 = 0.3;
pub const MARKER_PULSE_MS: u64 = 1000;

/// Marks cards `reveal` up front and `active` once they scroll into view,
/// staggered within each batch of visibility changes.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    observer: VisibilityObserver,
    /// `(due_ms, element)` reveals waiting for their stagger delay.
    pending: Vec<(u64, usize)>,
}

impl ScrollReveal {
    pub fn new(document: &mut Document) -> Self {
        let mut observer = VisibilityObserver::new(REVEAL_THRESHOLD);
        for element in document.query(REVEAL_SELECTOR) {
            document.add_class(element, REVEAL_CLASS);
            observer.observe(element);
        }
        tracing::debug!(targets = observer.len(), "scroll reveal ready");
        Self {
            observer,
            pending: Vec::new(),
        }
    }

    pub fn update(
        &mut self,
        document: &mut Document,
        layout: &PageLayout,
        viewport: ScrollViewport,
        now_ms: u64,
    ) {
        let entries = self.observer.poll(layout, viewport);
        for (index, entry) in entries.iter().enumerate() {
            if entry.is_intersecting {
                self.pending
                    .push((now_ms + index as u64 * STAGGER_MS, entry.element));
            }
        }

        self.pending.retain(|&(due, element)| {
            if due <= now_ms {
                document.add_class(element, ACTIVE_CLASS);
                false
            } else {
                true
            }
        });
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Marks timeline items `visible` and pulses their marker once.
#[derive(Debug, Clone)]
pub struct TimelineAnimation {
    observer: VisibilityObserver,
    /// `(end_ms, marker)` pulses in progress.
    pulses: Vec<(u64, usize)>,
}

impl TimelineAnimation {
    pub fn new(document: &Document) -> Self {
        let mut observer = VisibilityObserver::new(TIMELINE_THRESHOLD);
        for element in document.query(TIMELINE_SELECTOR) {
            observer.observe(element);
        }
        Self {
            observer,
            pulses: Vec::new(),
        }
    }

    pub fn update(
        &mut self,
        document: &mut Document,
        layout: &PageLayout,
        viewport: ScrollViewport,
        now_ms: u64,
    ) {
        for entry in self.observer.poll(layout, viewport) {
            if !entry.is_intersecting {
                continue;
            }
            document.add_class(entry.element, VISIBLE_CLASS);
            if let Some(marker) = marker_for(document, entry.element) {
                if let Some(el) = document.element_mut(marker) {
                    el.style.pulse = true;
                }
                self.pulses.push((now_ms + MARKER_PULSE_MS, marker));
            }
        }

        self.pulses.retain(|&(end, marker)| {
            if end <= now_ms {
                if let Some(el) = document.element_mut(marker) {
                    el.style.pulse = false;
                }
                false
            } else {
                true
            }
        });
    }
}

/// The marker whose `for` attribute names the item's id.
fn marker_for(document: &Document, item: usize) -> Option<usize> {
    let id = document.element(item)?.id.clone()?;
    document
        .query(TIMELINE_MARKER_SELECTOR)
        .into_iter()
        .find(|&m| document.element(m).and_then(|el| el.attr("for")) == Some(id.as_str()))
}
