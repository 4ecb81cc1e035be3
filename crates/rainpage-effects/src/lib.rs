//! Page document and effect controllers for the rainpage memoir page.
//!
//! The page is a flat list of elements with classes, text and a small style
//! record. Effect controllers select elements with CSS-like selectors and
//! toggle classes or write styles as the page scrolls and time passes.

mod document;
pub mod effects;
mod layout;
mod observer;
mod scroll;
mod selector;

pub use document::{Document, Element, ElementStyle, LOADED_CLASS, PageError};
pub use effects::PageEffects;
pub use layout::{Block, PageLayout, wrap};
pub use observer::{ScrollViewport, VisibilityEntry, VisibilityObserver};
pub use scroll::ScrollState;
pub use selector::{Selector, SelectorError};
