//! Types an element's text out one character at a time.

use crate::document::Document;

pub const TYPEWRITER_SELECTOR: &str = ".typewriter";
pub const CURSOR_CLASS: &str = "cursor-blink";
pub const START_DELAY_MS: u64 = 1000;
pub const CHAR_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TypewriterEffect {
    element: usize,
    text: Vec<char>,
    start_ms: u64,
    typed: usize,
    done: bool,
}

impl TypewriterEffect {
    /// Captures and clears the text of the `.typewriter` element. `None`
    /// when the page has none.
    pub fn new(document: &mut Document, now_ms: u64) -> Option<Self> {
        let element = document.query_one(TYPEWRITER_SELECTOR)?;
        let text = document.element(element)?.text.chars().collect();
        document.set_text(element, "");
        Some(Self {
            element,
            text,
            start_ms: now_ms + START_DELAY_MS,
            typed: 0,
            done: false,
        })
    }

    pub fn update(&mut self, document: &mut Document, now_ms: u64) {
        if self.done || now_ms < self.start_ms {
            return;
        }
        let elapsed = now_ms - self.start_ms;
        let due = usize::try_from(elapsed / CHAR_INTERVAL_MS + 1).unwrap_or(usize::MAX);
        let typed = due.min(self.text.len());
        if typed != self.typed {
            self.typed = typed;
            document.set_text(self.element, self.text[..typed].iter().collect::<String>());
        }
        // The cursor appears one interval after the last character.
        if due > self.text.len() {
            self.done = true;
            document.add_class(self.element, CURSOR_CLASS);
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: &str) -> Document {
        Document::from_toml_str(&format!(
            "[[element]]\nclasses = [\"typewriter\"]\ntext = \"{text}\"\n"
        ))
        .unwrap()
    }

    fn text(doc: &Document) -> &str {
        &doc.element(0).unwrap().text
    }

    #[test]
    fn test_types_after_delay() {
        let mut doc = page("hello");
        let mut tw = TypewriterEffect::new(&mut doc, 0).unwrap();
        assert_eq!(text(&doc), "");

        tw.update(&mut doc, 999);
        assert_eq!(text(&doc), "");
        tw.update(&mut doc, 1_000);
        assert_eq!(text(&doc), "h");
        tw.update(&mut doc, 1_120);
        assert_eq!(text(&doc), "hel");
        tw.update(&mut doc, 1_200);
        assert_eq!(text(&doc), "hello");
        assert!(!doc.has_class(0, CURSOR_CLASS));

        tw.update(&mut doc, 1_250);
        assert!(tw.is_done());
        assert!(doc.has_class(0, CURSOR_CLASS));
    }

    #[test]
    fn test_catches_up_after_a_gap() {
        let mut doc = page("héllo wörld");
        let mut tw = TypewriterEffect::new(&mut doc, 0).unwrap();
        tw.update(&mut doc, 10_000);
        assert_eq!(text(&doc), "héllo wörld");
        assert!(doc.has_class(0, CURSOR_CLASS));
    }

    #[test]
    fn test_absent_element_leaves_page_alone() {
        let mut doc = Document::from_toml_str("[[element]]\ntext = \"x\"\n").unwrap();
        let before = doc.clone();
        assert!(TypewriterEffect::new(&mut doc, 0).is_none());
        assert_eq!(doc, before);
    }
}
