//! Paint model shared between the canvas pipeline and renderers.
//!
//! Scope:
//! - color representation (premultiplied alpha) and byte-level color math
//! - paint sources (solid, linear and radial gradients)
//! - edge falloff and blend operators
//!
//! Geometry types remain in `coords`.

pub mod blend;
pub mod color;
pub mod falloff;
pub mod gradient;
pub mod rgb;

pub use blend::BlendMode;
pub use color::Color;
pub use falloff::{EdgeProfile, Falloff};
pub use gradient::{ColorStop, LinearGradient, RadialGradient, Ramp};
pub use rgb::{ColorParseError, Hsv, Rgb};

/// Paint source for filling geometry.
///
/// Renderers dispatch on the variant once per command, not per pixel.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    /// Color stops of gradient paints; empty for solids.
    pub fn stops(&self) -> &[ColorStop] {
        match self {
            Paint::Solid(_) => &[],
            Paint::LinearGradient(g) => &g.stops,
            Paint::RadialGradient(g) => &g.stops,
        }
    }

    /// True when the paint cannot contribute any color.
    pub fn is_invisible(&self) -> bool {
        match self {
            Paint::Solid(c) => c.a <= 0.0,
            _ => self.stops().iter().all(|s| s.color.a <= 0.0),
        }
    }
}
