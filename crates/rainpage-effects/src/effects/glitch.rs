//! Random chromatic jitter on the `.glitch` title.

use rand::Rng;

use crate::document::Document;

pub const GLITCH_SELECTOR: &str = ".glitch";
pub const CHECK_INTERVAL_MS: u64 = 100;
pub const GLITCH_PROBABILITY: f64 = 0.05;
pub const GLITCH_DURATION_MS: u64 = 100;
/// Shadow offsets fall in `-MAX_OFFSET..MAX_OFFSET`.
pub const MAX_OFFSET: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct GlitchEffect {
    element: usize,
    next_check_ms: u64,
    restore_at_ms: Option<u64>,
    probability: f64,
}

impl GlitchEffect {
    pub fn new(document: &Document, now_ms: u64) -> Option<Self> {
        let element = document.query_one(GLITCH_SELECTOR)?;
        Some(Self {
            element,
            next_check_ms: now_ms + CHECK_INTERVAL_MS,
            restore_at_ms: None,
            probability: GLITCH_PROBABILITY,
        })
    }

    /// Override the per-check trigger probability.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn update<R: Rng + ?Sized>(&mut self, document: &mut Document, rng: &mut R, now_ms: u64) {
        if self.restore_at_ms.is_some_and(|at| now_ms >= at) {
            self.restore_at_ms = None;
            if let Some(el) = document.element_mut(self.element) {
                el.style.shadow = None;
            }
        }

        if now_ms < self.next_check_ms {
            return;
        }
        self.next_check_ms = now_ms + CHECK_INTERVAL_MS;
        if !rng.gen_bool(self.probability) {
            return;
        }

        let mut offset = || rng.gen_range(-MAX_OFFSET..MAX_OFFSET);
        let shadow = [(offset(), offset()), (offset(), offset())];
        if let Some(el) = document.element_mut(self.element) {
            el.style.shadow = Some(shadow);
        }
        self.restore_at_ms = Some(now_ms + GLITCH_DURATION_MS);
    }

    pub fn is_glitching(&self) -> bool {
        self.restore_at_ms.is_some()
    }
}
