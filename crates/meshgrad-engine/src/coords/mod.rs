//! Coordinate and geometry types shared across the engine and the canvas.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! `Outline` is the closed set of footprints the canvas knows how to fill,
//! stroke and hit-test.

mod outline;
mod rect;
mod vec2;
mod viewport;

pub use outline::Outline;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
