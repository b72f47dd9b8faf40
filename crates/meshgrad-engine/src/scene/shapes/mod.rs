pub(crate) mod fill;
pub(crate) mod image;
pub(crate) mod line;
pub(crate) mod ring;
pub(crate) mod stroke;
pub(crate) mod text;

pub use fill::FillCmd;
pub use image::ImageCmd;
pub use line::LineCmd;
pub use ring::RingCmd;
pub use stroke::StrokeCmd;
pub use text::{TextCmd, TextRotation};

/// On/off dash pattern in logical pixels, measured along the path.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Dash {
    pub on: f32,
    pub off: f32,
}

impl Dash {
    #[inline]
    pub const fn new(on: f32, off: f32) -> Self {
        Self { on, off }
    }

    /// True if arc-length position `s` falls on a dash.
    #[inline]
    pub fn is_on(&self, s: f32) -> bool {
        let period = self.on + self.off;
        if period <= 0.0 || self.off <= 0.0 {
            return true;
        }
        s.rem_euclid(period) < self.on
    }
}

#[cfg(test)]
mod tests {
    use super::Dash;

    #[test]
    fn dash_alternates() {
        let d = Dash::new(6.0, 4.0);
        assert!(d.is_on(0.0));
        assert!(d.is_on(5.9));
        assert!(!d.is_on(6.1));
        assert!(d.is_on(10.5));
        assert!(!d.is_on(-1.0));
    }

    #[test]
    fn zero_gap_is_solid() {
        assert!(Dash::new(3.0, 0.0).is_on(100.0));
    }
}
