//! Effect controllers. Each one finds its elements when constructed and
//! mutates classes, text or style on every update.

mod counter;
mod glitch;
mod parallax;
mod reveal;
mod smooth_scroll;
mod typewriter;

pub use counter::{NumberCounter, ease_out_quad, format_number};
pub use glitch::GlitchEffect;
pub use parallax::ParallaxEffect;
pub use reveal::{ACTIVE_CLASS, REVEAL_CLASS, ScrollReveal, TimelineAnimation, VISIBLE_CLASS};
pub use smooth_scroll::SmoothScroll;
pub use typewriter::{CURSOR_CLASS, TypewriterEffect};

use rand::Rng;

use crate::{document::Document, layout::PageLayout, scroll::ScrollState};

/// Every effect controller of the page, driven from one clock.
#[derive(Debug, Clone)]
pub struct PageEffects {
    reveal: ScrollReveal,
    timeline: TimelineAnimation,
    counter: NumberCounter,
    smooth_scroll: SmoothScroll,
    parallax: Option<ParallaxEffect>,
    typewriter: Option<TypewriterEffect>,
    glitch: Option<GlitchEffect>,
}

impl PageEffects {
    pub fn new(document: &mut Document, smooth_scroll_ms: u64, now_ms: u64) -> Self {
        let effects = Self {
            reveal: ScrollReveal::new(document),
            timeline: TimelineAnimation::new(document),
            counter: NumberCounter::new(document),
            smooth_scroll: SmoothScroll::new(document, smooth_scroll_ms),
            parallax: ParallaxEffect::new(document),
            typewriter: TypewriterEffect::new(document, now_ms),
            glitch: GlitchEffect::new(document, now_ms),
        };
        tracing::debug!(
            anchors = effects.smooth_scroll.anchors().len(),
            parallax = effects.parallax.is_some(),
            typewriter = effects.typewriter.is_some(),
            glitch = effects.glitch.is_some(),
            "page effects ready"
        );
        effects
    }

    /// Anchor elements, in the order `activate_anchor` numbers them.
    pub fn anchors(&self) -> &[usize] {
        self.smooth_scroll.anchors()
    }

    pub fn activate_anchor(
        &mut self,
        n: usize,
        document: &Document,
        layout: &PageLayout,
        scroll: &ScrollState,
        now_ms: u64,
    ) -> bool {
        self.smooth_scroll
            .activate(n, document, layout, scroll.offset(), now_ms)
    }

    /// Stop an anchor scroll in progress.
    pub fn cancel_scroll(&mut self) {
        self.smooth_scroll.cancel();
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        document: &mut Document,
        layout: &PageLayout,
        scroll: &mut ScrollState,
        rng: &mut R,
        now_ms: u64,
    ) {
        if let Some(offset) = self.smooth_scroll.update(now_ms) {
            scroll.scroll_to(offset);
        }
        if let Some(parallax) = &self.parallax {
            parallax.update(document, scroll.offset(), scroll.viewport_height());
        }
        if let Some(typewriter) = &mut self.typewriter {
            typewriter.update(document, now_ms);
        }
        if let Some(glitch) = &mut self.glitch {
            glitch.update(document, rng, now_ms);
        }

        let viewport = scroll.viewport();
        self.reveal.update(document, layout, viewport, now_ms);
        self.timeline.update(document, layout, viewport, now_ms);
        self.counter.update(document, layout, viewport, now_ms);
    }
}
