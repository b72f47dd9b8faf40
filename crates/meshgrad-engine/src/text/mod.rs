//! Font loading and text measurement (fontdue).
//!
//! Rasterization lives with the other CPU shape rasterizers in
//! `render::shapes::text`.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
