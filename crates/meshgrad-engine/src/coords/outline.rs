use core::f32::consts::TAU;

use super::{Rect, Vec2};

/// Closed shape footprint used for clipping, stroking and hit-testing.
///
/// Distances follow the usual SDF convention: negative inside, zero on the
/// boundary, positive outside.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Outline {
    Circle { center: Vec2, radius: f32 },
    Rect(Rect),
}

impl Outline {
    #[inline]
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Outline::Circle { center, radius: radius.max(0.0) }
    }

    #[inline]
    pub fn rect(rect: Rect) -> Self {
        Outline::Rect(rect.normalized())
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        match *self {
            Outline::Circle { center, .. } => center,
            Outline::Rect(r) => r.center(),
        }
    }

    /// Axis-aligned bounding box.
    #[inline]
    pub fn bounds(&self) -> Rect {
        match *self {
            Outline::Circle { center, radius } => {
                Rect::from_center_size(center, Vec2::new(radius * 2.0, radius * 2.0))
            }
            Outline::Rect(r) => r,
        }
    }

    /// Signed distance from `p` to the boundary.
    pub fn signed_distance(&self, p: Vec2) -> f32 {
        match *self {
            Outline::Circle { center, radius } => p.distance(center) - radius,
            Outline::Rect(r) => {
                let half = r.size * 0.5;
                let d = p - r.center();
                let qx = d.x.abs() - half.x;
                let qy = d.y.abs() - half.y;
                let outside = Vec2::new(qx.max(0.0), qy.max(0.0)).length();
                let inside = qx.max(qy).min(0.0);
                outside + inside
            }
        }
    }

    /// Unsigned distance from `p` to the nearest boundary point.
    ///
    /// For rectangles this is the distance to the nearest edge segment, both
    /// from inside and outside.
    #[inline]
    pub fn boundary_distance(&self, p: Vec2) -> f32 {
        self.signed_distance(p).abs()
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.signed_distance(p) <= 0.0
    }

    /// Same shape shrunk by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Outline {
        match *self {
            Outline::Circle { center, radius } => Outline::circle(center, radius - amount),
            Outline::Rect(r) => Outline::Rect(r.inset(amount)),
        }
    }

    /// Applies `(p + offset) * scale` to the whole shape.
    pub fn transformed(&self, offset: Vec2, scale: f32) -> Outline {
        match *self {
            Outline::Circle { center, radius } => {
                Outline::circle((center + offset) * scale, radius * scale)
            }
            Outline::Rect(r) => {
                Outline::Rect(Rect::from_origin_size((r.origin + offset) * scale, r.size * scale))
            }
        }
    }

    pub fn perimeter(&self) -> f32 {
        match *self {
            Outline::Circle { radius, .. } => TAU * radius,
            Outline::Rect(r) => 2.0 * (r.size.x + r.size.y),
        }
    }

    /// Arc-length position of the boundary point nearest to `p`.
    ///
    /// Circles start at +X and run clockwise (in +Y-down space); rectangles
    /// start at the top-left corner and run clockwise. Used to lay out dashes.
    pub fn arc_position(&self, p: Vec2) -> f32 {
        match *self {
            Outline::Circle { center, radius } => {
                let mut a = (p - center).angle();
                if a < 0.0 {
                    a += TAU;
                }
                a * radius
            }
            Outline::Rect(r) => {
                let (min, max) = (r.min(), r.max());
                let (w, h) = (r.size.x, r.size.y);
                let x = p.x.clamp(min.x, max.x);
                let y = p.y.clamp(min.y, max.y);

                let top = (p.y - min.y).abs();
                let right = (p.x - max.x).abs();
                let bottom = (p.y - max.y).abs();
                let left = (p.x - min.x).abs();
                let nearest = top.min(right).min(bottom).min(left);

                if nearest == top {
                    x - min.x
                } else if nearest == right {
                    w + (y - min.y)
                } else if nearest == bottom {
                    w + h + (max.x - x)
                } else {
                    2.0 * w + h + (max.y - y)
                }
            }
        }
    }
}
