use crate::coords::Vec2;

/// Edge falloff curve across an influence radius.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum EdgeProfile {
    /// Linear fade from 1 at the center to 0 at the radius.
    #[default]
    Soft,
    /// Full strength up to [`EdgeProfile::HARD_PLATEAU`], then a linear fade to 0.
    Hard,
}

impl EdgeProfile {
    pub const HARD_PLATEAU: f32 = 0.8;

    /// Weight at normalized distance `t` (0 = center, 1 = radius).
    #[inline]
    pub fn weight(self, t: f32) -> f32 {
        let t = t.max(0.0);
        if t >= 1.0 {
            return 0.0;
        }
        match self {
            EdgeProfile::Soft => 1.0 - t,
            EdgeProfile::Hard => {
                if t <= Self::HARD_PLATEAU {
                    1.0
                } else {
                    (1.0 - t) / (1.0 - Self::HARD_PLATEAU)
                }
            }
        }
    }
}

/// Radial alpha falloff around `center`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Falloff {
    pub center: Vec2,
    pub radius: f32,
    pub profile: EdgeProfile,
}

impl Falloff {
    #[inline]
    pub fn new(center: Vec2, radius: f32, profile: EdgeProfile) -> Self {
        Self { center, radius, profile }
    }

    #[inline]
    pub fn weight_at(&self, p: Vec2) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        self.profile.weight(p.distance(self.center) / self.radius)
    }
}
