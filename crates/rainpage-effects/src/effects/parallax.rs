//! Hero fade and drift while scrolling away from the top.

use crate::document::Document;

pub const HERO_SELECTOR: &str = ".hero";
pub const HERO_CONTENT_SELECTOR: &str = ".hero-content";
/// Rows the hero content drifts per row scrolled.
pub const DRIFT_FACTOR: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct ParallaxEffect {
    hero: usize,
    content: Option<usize>,
}

impl ParallaxEffect {
    /// `None` when the page has no hero.
    pub fn new(document: &Document) -> Option<Self> {
        let Some(hero) = document.query_one(HERO_SELECTOR) else {
            tracing::debug!("no hero element, parallax disabled");
            return None;
        };
        Some(Self {
            hero,
            content: document.query_one(HERO_CONTENT_SELECTOR),
        })
    }

    pub fn update(&self, document: &mut Document, scrolled: u32, viewport_height: u32) {
        if scrolled >= viewport_height {
            return;
        }
        let scrolled = scrolled as f32;
        if let Some(hero) = document.element_mut(self.hero) {
            hero.style.opacity = (1.0 - scrolled / viewport_height as f32).max(0.0);
        }
        if let Some(content) = self.content.and_then(|i| document.element_mut(i)) {
            content.style.translate_y = scrolled * DRIFT_FACTOR;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
[[element]]
classes = ["hero"]
text = "Farewell"

[[element]]
classes = ["hero-content"]
text = "Six years"
"#;

    #[test]
    fn test_fades_and_drifts() {
        let mut doc = Document::from_toml_str(PAGE).unwrap();
        let parallax = ParallaxEffect::new(&doc).unwrap();

        parallax.update(&mut doc, 10, 40);
        assert_eq!(doc.element(0).unwrap().style.opacity, 0.75);
        assert!((doc.element(1).unwrap().style.translate_y - 3.0).abs() < 1e-5);

        parallax.update(&mut doc, 0, 40);
        assert_eq!(doc.element(0).unwrap().style.opacity, 1.0);
        assert_eq!(doc.element(1).unwrap().style.translate_y, 0.0);
    }

    #[test]
    fn test_past_viewport_leaves_style() {
        let mut doc = Document::from_toml_str(PAGE).unwrap();
        let parallax = ParallaxEffect::new(&doc).unwrap();
        parallax.update(&mut doc, 30, 40);
        let before = doc.clone();
        parallax.update(&mut doc, 40, 40);
        parallax.update(&mut doc, 0, 0);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_absent_hero() {
        let doc = Document::from_toml_str("[[element]]\ntext = \"x\"\n").unwrap();
        assert!(ParallaxEffect::new(&doc).is_none());
    }
}
