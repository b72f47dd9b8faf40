//! Shared rasterization helpers used by all shape rasterizers.

use crate::coords::{Rect, Vec2};
use crate::paint::{Color, LinearGradient, Paint, RadialGradient, Ramp};

// ── pixel spans ───────────────────────────────────────────────────────────

/// Half-open pixel rectangle `[x0, x1) × [y0, y1)` on a target surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct PixelSpan {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelSpan {
    #[inline]
    pub fn full(width: u32, height: u32) -> Self {
        Self { x0: 0, y0: 0, x1: width, y1: height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Narrows the span to the physical pixels touched by a logical rect.
    ///
    /// Edges are rounded outward so anti-aliased borders are not cut.
    pub fn clipped_to(self, rect: Rect, scale: f32) -> Self {
        let r = rect.normalized();
        let to_px = |v: f32| (v * scale).max(0.0);
        let x0 = to_px(r.origin.x).floor() as u32;
        let y0 = to_px(r.origin.y).floor() as u32;
        let x1 = to_px(r.origin.x + r.size.x).ceil() as u32;
        let y1 = to_px(r.origin.y + r.size.y).ceil() as u32;
        Self {
            x0: self.x0.max(x0),
            y0: self.y0.max(y0),
            x1: self.x1.min(x1),
            y1: self.y1.min(y1),
        }
    }

    /// Iterates pixel coordinates row by row.
    pub fn pixels(self) -> impl Iterator<Item = (u32, u32)> {
        (self.y0..self.y1).flat_map(move |y| (self.x0..self.x1).map(move |x| (x, y)))
    }
}

/// Logical-space position of the center of pixel `(x, y)`.
#[inline]
pub(crate) fn pixel_center(x: u32, y: u32, scale: f32) -> Vec2 {
    Vec2::new((x as f32 + 0.5) / scale, (y as f32 + 0.5) / scale)
}

/// Anti-aliased area coverage from a signed distance in physical pixels.
#[inline]
pub(crate) fn coverage(signed_distance_px: f32) -> f32 {
    (0.5 - signed_distance_px).clamp(0.0, 1.0)
}

// ── paint resolution ──────────────────────────────────────────────────────

/// A paint prepared for per-pixel evaluation.
///
/// Gradient stops are baked into a [`Ramp`] once per command.
pub(crate) enum Shader<'a> {
    Solid(Color),
    Linear { paint: &'a LinearGradient, ramp: Ramp },
    Radial { paint: &'a RadialGradient, ramp: Ramp },
}

impl<'a> Shader<'a> {
    pub fn resolve(paint: &'a Paint) -> Self {
        if paint.stops().len() == 1 {
            log::trace!("single-stop gradient renders as a flat color");
        }
        match paint {
            Paint::Solid(c) => Shader::Solid(*c),
            Paint::LinearGradient(g) => Shader::Linear { paint: g, ramp: Ramp::new(&g.stops) },
            Paint::RadialGradient(g) => Shader::Radial { paint: g, ramp: Ramp::new(&g.stops) },
        }
    }

    /// Color at logical position `p`, or `None` where the paint is undefined.
    #[inline]
    pub fn shade(&self, p: Vec2) -> Option<Color> {
        match self {
            Shader::Solid(c) => Some(*c),
            Shader::Linear { paint, ramp } => Some(ramp.at(paint.param_at(p))),
            Shader::Radial { paint, ramp } => {
                let t = paint.param_at(p)?;
                Some(ramp.at(t))
            }
        }
    }
}
