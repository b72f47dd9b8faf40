use super::{Rect, Vec2};

/// Surface size in logical pixels.
///
/// The canvas session only resolves pointer positions while a viewport is
/// attached; renderers size their layer surfaces from it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Whole-pixel surface dimensions (at least 1×1).
    #[inline]
    pub fn pixel_size(self) -> (u32, u32) {
        (self.width.ceil().max(1.0) as u32, self.height.ceil().max(1.0) as u32)
    }

    /// Surface dimensions at `scale` device pixels per logical pixel.
    pub fn physical_size(self, scale: f32) -> (u32, u32) {
        let w = (self.width * scale).round().max(1.0) as u32;
        let h = (self.height * scale).round().max(1.0) as u32;
        (w, h)
    }
}
