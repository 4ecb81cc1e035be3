//! Count-up animation for statistic numbers.

use crate::{
    document::Document,
    layout::PageLayout,
    observer::{ScrollViewport, VisibilityObserver},
};

pub const COUNTER_SELECTOR: &str = ".stat-number[data-target]";
pub const COUNTED_CLASS: &str = "counted";
pub const COUNTING_CLASS: &str = "counting";
pub const COUNTER_THRESHOLD: f32 = 0.5;
pub const COUNT_DURATION_MS: u64 = 2000;
const FRAMES_PER_SECOND: u64 = 60;

/// Frames in one count-up.
pub fn total_frames() -> u64 {
    COUNT_DURATION_MS * FRAMES_PER_SECOND / 1000
}

pub fn ease_out_quad(t: f64) -> f64 {
    t * (2.0 - t)
}

/// `1.5M` from a million up, `12,345` from a thousand up, plain below.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        // Half-tenths round up.
        let tenths = (n + 50_000) / 100_000;
        return format!("{}.{}M", tenths / 10, tenths % 10);
    }
    let digits = n.to_string();
    if n < 1_000 {
        return digits;
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Leading decimal digits of the attribute; anything else counts as 0.
fn parse_target(value: &str) -> u64 {
    let digits: String = value
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

#[derive(Debug, Clone, Copy)]
struct Run {
    element: usize,
    target: u64,
    start_ms: u64,
}

#[derive(Debug, Clone)]
pub struct NumberCounter {
    observer: VisibilityObserver,
    runs: Vec<Run>,
}

impl NumberCounter {
    pub fn new(document: &Document) -> Self {
        let mut observer = VisibilityObserver::new(COUNTER_THRESHOLD);
        for element in document.query(COUNTER_SELECTOR) {
            observer.observe(element);
        }
        Self {
            observer,
            runs: Vec::new(),
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
            if !entry.is_intersecting || document.has_class(entry.element, COUNTED_CLASS) {
                continue;
            }
            let target = document
                .element(entry.element)
                .and_then(|el| el.attr("data-target"))
                .map_or(0, parse_target);
            document.add_class(entry.element, COUNTED_CLASS);
            self.runs.push(Run {
                element: entry.element,
                target,
                start_ms: now_ms,
            });
        }

        let total = total_frames();
        self.runs.retain(|run| {
            let frame = now_ms.saturating_sub(run.start_ms) * FRAMES_PER_SECOND / 1000;
            if frame == 0 {
                return true;
            }
            if frame >= total {
                document.set_text(run.element, format_number(run.target));
                document.remove_class(run.element, COUNTING_CLASS);
                return false;
            }
            let progress = ease_out_quad(frame as f64 / total as f64);
            let current = (run.target as f64 * progress).round() as u64;
            document.set_text(run.element, format_number(current));
            document.add_class(run.element, COUNTING_CLASS);
            true
        });
    }

    pub fn is_counting(&self) -> bool {
        !self.runs.is_empty()
    }
}
