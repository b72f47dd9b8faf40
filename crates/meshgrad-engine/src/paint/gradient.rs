use crate::coords::Vec2;

use super::Color;

/// A single gradient stop.
///
/// `t` is in [0, 1]; colors are premultiplied. Stops need not be sorted:
/// [`Ramp::new`] sorts a copy.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient definition in logical pixel space.
///
/// Semantics:
/// - `start` and `end` are positions in the same coordinate space as geometry.
/// - the parameter is the projection onto the `start → end` axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>) -> Self {
        Self { start, end, stops }
    }

    /// Gradient through `center` along `angle`, running from `-extent` to `+extent`.
    pub fn along_axis(center: Vec2, angle: f32, extent: f32, stops: Vec<ColorStop>) -> Self {
        let dir = Vec2::from_angle(angle) * extent;
        Self::new(center - dir, center + dir, stops)
    }

    /// Gradient parameter at `p`, unclamped.
    #[inline]
    pub fn param_at(&self, p: Vec2) -> f32 {
        let axis = self.end - self.start;
        let len2 = axis.length_squared();
        if len2 <= f32::EPSILON {
            return 0.0;
        }
        (p - self.start).dot(axis) / len2
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && (self.end.x != self.start.x || self.end.y != self.start.y)
    }
}

/// Two-point conical gradient: a zero-radius start circle at `focus` growing
/// into an end circle of `radius` around `center`.
///
/// This is the canvas-2D `createRadialGradient(focus, 0, center, radius)`
/// model: the focus may sit anywhere, including outside the end circle.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub focus: Vec2,
    pub center: Vec2,
    pub radius: f32,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(focus: Vec2, center: Vec2, radius: f32, stops: Vec<ColorStop>) -> Self {
        Self { focus, center, radius, stops }
    }

    /// Gradient parameter at `p`, or `None` where no interpolated circle
    /// passes through `p` (only possible when the focus lies outside the end circle).
    ///
    /// Solves `|p - f - t·(c - f)| = t·R` for the largest `t ≥ 0`.
    pub fn param_at(&self, p: Vec2) -> Option<f32> {
        if self.radius <= 0.0 {
            return None;
        }
        let d = self.center - self.focus;
        let q = p - self.focus;
        let r2 = self.radius * self.radius;

        let a = d.length_squared() - r2;
        let b = q.dot(d);
        let c = q.length_squared();

        if a.abs() <= 1e-4 * r2 {
            // Focus on the end circle: the quadratic degenerates to linear.
            if b.abs() <= f32::EPSILON {
                return None;
            }
            let t = c / (2.0 * b);
            return (t >= 0.0).then_some(t);
        }

        let disc = b * b - a * c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let t0 = (b + sq) / a;
        let t1 = (b - sq) / a;
        let t = t0.max(t1);
        if t >= 0.0 {
            Some(t)
        } else {
            let t = t0.min(t1);
            (t >= 0.0).then_some(t)
        }
    }
}

/// Precomputed color lookup for a stop list.
///
/// Colors are interpolated in premultiplied space between the bracketing stops
/// and padded with the first/last stop outside their range.
#[derive(Debug, Clone, PartialEq)]
pub struct Ramp {
    lut: Vec<Color>,
}

impl Ramp {
    const SIZE: usize = 256;

    pub fn new(stops: &[ColorStop]) -> Self {
        let mut sorted: Vec<ColorStop> = stops
            .iter()
            .copied()
            .filter(|s| s.t.is_finite() && s.color.is_finite())
            .collect();
        sorted.sort_by(|a, b| a.t.total_cmp(&b.t));

        let lut = (0..Self::SIZE)
            .map(|i| Self::evaluate(&sorted, i as f32 / (Self::SIZE - 1) as f32))
            .collect();
        Self { lut }
    }

    fn evaluate(sorted: &[ColorStop], t: f32) -> Color {
        let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
            return Color::TRANSPARENT;
        };
        if t <= first.t {
            return first.color;
        }
        if t >= last.t {
            return last.color;
        }
        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.t && t <= b.t {
                let span = b.t - a.t;
                let f = if span <= f32::EPSILON { 1.0 } else { (t - a.t) / span };
                return a.color.lerp(b.color, f);
            }
        }
        last.color
    }

    /// Color at `t` in [0, 1] (clamped).
    #[inline]
    pub fn at(&self, t: f32) -> Color {
        let i = (t.clamp(0.0, 1.0) * (Self::SIZE - 1) as f32).round() as usize;
        self.lut[i.min(Self::SIZE - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    // ── linear ────────────────────────────────────────────────────────────

    #[test]
    fn linear_param_projects_onto_axis() {
        let g = LinearGradient::along_axis(Vec2::new(0.0, 0.0), 0.0, 10.0, vec![]);
        assert!(close(g.param_at(Vec2::new(-10.0, 5.0)), 0.0));
        assert!(close(g.param_at(Vec2::new(0.0, -3.0)), 0.5));
        assert!(close(g.param_at(Vec2::new(10.0, 0.0)), 1.0));
    }

    #[test]
    fn linear_vertical_axis() {
        let g = LinearGradient::along_axis(Vec2::zero(), core::f32::consts::FRAC_PI_2, 10.0, vec![]);
        assert!(close(g.param_at(Vec2::new(0.0, 10.0)), 1.0));
    }

    // ── radial ────────────────────────────────────────────────────────────

    #[test]
    fn radial_concentric_is_distance_over_radius() {
        let g = RadialGradient::new(Vec2::zero(), Vec2::zero(), 10.0, vec![]);
        assert!(close(g.param_at(Vec2::new(5.0, 0.0)).unwrap(), 0.5));
        assert!(close(g.param_at(Vec2::new(0.0, 10.0)).unwrap(), 1.0));
        assert!(close(g.param_at(Vec2::zero()).unwrap(), 0.0));
    }

    #[test]
    fn radial_offset_focus_reaches_one_on_end_circle() {
        let g = RadialGradient::new(Vec2::new(4.0, 0.0), Vec2::zero(), 10.0, vec![]);
        for p in [Vec2::new(10.0, 0.0), Vec2::new(-10.0, 0.0), Vec2::new(0.0, 10.0)] {
            assert!(close(g.param_at(p).unwrap(), 1.0), "{p:?}");
        }
        assert!(close(g.param_at(Vec2::new(4.0, 0.0)).unwrap(), 0.0));
    }

    #[test]
    fn radial_focus_outside_leaves_gaps() {
        let g = RadialGradient::new(Vec2::new(30.0, 0.0), Vec2::zero(), 10.0, vec![]);
        // Directly behind the focus, away from the end circle.
        assert!(g.param_at(Vec2::new(40.0, 0.0)).is_none());
    }

    // ── ramp ──────────────────────────────────────────────────────────────

    #[test]
    fn ramp_pads_and_interpolates() {
        let ramp = Ramp::new(&[
            ColorStop::new(0.75, Color::WHITE),
            ColorStop::new(0.25, Color::BLACK),
        ]);
        assert_eq!(ramp.at(0.0), Color::BLACK);
        assert_eq!(ramp.at(1.0), Color::WHITE);
        assert!(close(ramp.at(0.5).r, 0.5));
    }

    #[test]
    fn ramp_empty_is_transparent() {
        assert_eq!(Ramp::new(&[]).at(0.3), Color::TRANSPARENT);
    }
}
