//! The page document: a flat, ordered list of elements loaded from TOML.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::selector::Selector;

/// Body class added once the first frame has been drawn.
pub const LOADED_CLASS: &str = "loaded";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read page {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse page: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Presentation state effects write to.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub opacity: f32,
    /// Vertical shift in rows.
    pub translate_y: f32,
    /// Two offset copies drawn behind the text while glitching.
    pub shadow: Option<[(f32, f32); 2]>,
    pub pulse: bool,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_y: 0.0,
            shadow: None,
            pulse: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub text: String,
    pub attrs: BTreeMap<String, String>,
    pub style: ElementStyle,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: BTreeSet::new(),
            text: String::new(),
            attrs: BTreeMap::new(),
            style: ElementStyle::default(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementEntry {
    #[serde(default = "default_tag")]
    tag: String,
    id: Option<String>,
    #[serde(default)]
    classes: Vec<String>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    attrs: BTreeMap<String, String>,
}

fn default_tag() -> String {
    "div".to_string()
}

#[derive(Debug, Deserialize)]
struct PageFile {
    title: Option<String>,
    #[serde(default, rename = "element")]
    elements: Vec<ElementEntry>,
}

/// The page and its body classes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: Option<String>,
    elements: Vec<Element>,
    body_classes: BTreeSet<String>,
}

impl Document {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            title: None,
            elements,
            body_classes: BTreeSet::new(),
        }
    }

    /// Parse a page from TOML `[[element]]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self, PageError> {
        let file: PageFile = toml::from_str(content)?;
        let elements = file
            .elements
            .into_iter()
            .map(|entry| Element {
                tag: entry.tag,
                id: entry.id,
                classes: entry.classes.into_iter().collect(),
                text: entry.text,
                attrs: entry.attrs,
                style: ElementStyle::default(),
            })
            .collect();
        Ok(Self {
            title: file.title,
            ..Self::new(elements)
        })
    }

    pub fn load(path: &Path) -> Result<Self, PageError> {
        let content = fs::read_to_string(path).map_err(|source| PageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), elements = document.len(), "loaded page");
        Ok(document)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    /// Index of the element with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<usize> {
        self.elements
            .iter()
            .position(|el| el.id.as_deref() == Some(id))
    }

    /// Indices of every element matching the selector, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| selector.matches(el))
            .map(|(i, _)| i)
            .collect()
    }

    /// Like [`Document::select`] for a selector string. An invalid selector
    /// matches nothing.
    pub fn query(&self, selector: &str) -> Vec<usize> {
        match Selector::parse(selector) {
            Ok(selector) => self.select(&selector),
            Err(err) => {
                tracing::warn!(selector, %err, "invalid selector");
                Vec::new()
            }
        }
    }

    /// First element matching the selector.
    pub fn query_one(&self, selector: &str) -> Option<usize> {
        self.query(selector).into_iter().next()
    }

    pub fn has_class(&self, index: usize, class: &str) -> bool {
        self.element(index).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, index: usize, class: &str) {
        if let Some(el) = self.element_mut(index) {
            el.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, index: usize, class: &str) {
        if let Some(el) = self.element_mut(index) {
            el.classes.remove(class);
        }
    }

    pub fn set_text(&mut self, index: usize, text: impl Into<String>) {
        if let Some(el) = self.element_mut(index) {
            el.text = text.into();
        }
    }

    pub fn body_has_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    /// Flag the page as loaded.
    pub fn mark_loaded(&mut self) {
        if self.body_classes.insert(LOADED_CLASS.to_string()) {
            tracing::debug!("page loaded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PAGE: &str = r##"
title = "Farewell"

[[element]]
id = "hero"
classes = ["hero"]
text = "Six years"

[[element]]
tag = "a"
text = "Timeline"
attrs = { href = "#timeline" }

[[element]]
id = "timeline"
classes = ["timeline-item", "card"]
text = "2019"
"##;

    #[test]
    fn test_parse_page() {
        let doc = Document::from_toml_str(PAGE).unwrap();
        assert_eq!(doc.title.as_deref(), Some("Farewell"));
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.element(0).unwrap().tag, "div");
        assert_eq!(doc.element(1).unwrap().attr("href"), Some("#timeline"));
        assert!(doc.element(2).unwrap().has_class("card"));
        assert_eq!(doc.find_by_id("timeline"), Some(2));
        assert_eq!(doc.find_by_id("missing"), None);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(matches!(
            Document::from_toml_str("[[element]]\ncolour = \"red\"\n"),
            Err(PageError::Parse(_))
        ));
    }

    #[test]
    fn test_query() {
        let doc = Document::from_toml_str(PAGE).unwrap();
        assert_eq!(doc.query(".hero, .timeline-item"), vec![0, 2]);
        assert_eq!(doc.query(r##"a[href^="#"]"##), vec![1]);
        assert_eq!(doc.query_one(".nothing"), None);
        assert!(doc.query("..").is_empty());
    }

    #[test]
    fn test_class_mutation_ignores_missing_index() {
        let mut doc = Document::from_toml_str(PAGE).unwrap();
        let before = doc.clone();
        doc.add_class(99, "active");
        doc.set_text(99, "x");
        assert_eq!(doc, before);

        doc.add_class(0, "active");
        assert!(doc.has_class(0, "active"));
        doc.remove_class(0, "active");
        assert!(!doc.has_class(0, "active"));
    }

    #[test]
    fn test_mark_loaded() {
        let mut doc = Document::default();
        assert!(!doc.body_has_class(LOADED_CLASS));
        doc.mark_loaded();
        assert!(doc.body_has_class(LOADED_CLASS));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAGE.as_bytes()).unwrap();
        assert_eq!(Document::load(file.path()).unwrap().len(), 3);

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Document::load(&dir.path().join("none.toml")),
            Err(PageError::Io { .. })
        ));
    }
}
