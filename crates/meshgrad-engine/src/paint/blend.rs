use super::Color;

/// Compositing operator applied when a source pixel lands on the destination.
///
/// Both operate on premultiplied colors.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BlendMode {
    /// `s + d·(1 − sa)`.
    #[default]
    SourceOver,
    /// `s + d − s·d` per channel. Never darkens the destination.
    Screen,
}

impl BlendMode {
    #[inline]
    pub fn apply(self, src: Color, dst: Color) -> Color {
        match self {
            BlendMode::SourceOver => {
                let k = 1.0 - src.a;
                Color::from_premul(src.r + dst.r * k, src.g + dst.g * k, src.b + dst.b * k, src.a + dst.a * k)
            }
            BlendMode::Screen => {
                let s = |a: f32, b: f32| a + b - a * b;
                Color::from_premul(s(src.r, dst.r), s(src.g, dst.g), s(src.b, dst.b), s(src.a, dst.a))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_over_opaque_replaces() {
        let out = BlendMode::SourceOver.apply(Color::WHITE, Color::BLACK);
        assert_eq!(out, Color::WHITE);
    }

    #[test]
    fn screen_never_darkens() {
        let dst = Color::from_premul(0.4, 0.2, 0.1, 1.0);
        let src = Color::from_premul(0.3, 0.3, 0.3, 0.6);
        let out = BlendMode::Screen.apply(src, dst);
        assert!(out.r >= dst.r && out.g >= dst.g && out.b >= dst.b);
        assert!(out.r >= src.r && out.g >= src.g && out.b >= src.b);
    }

    #[test]
    fn screen_with_transparent_is_identity() {
        let dst = Color::from_premul(0.4, 0.2, 0.1, 1.0);
        assert_eq!(BlendMode::Screen.apply(Color::TRANSPARENT, dst), dst);
    }
}
