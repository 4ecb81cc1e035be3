//! Core types shared by the rainpage crates.

mod color;
mod theme;
mod viewport;

pub use color::{ColorParseError, Rgb};
pub use theme::ColorTheme;
pub use viewport::Viewport;
