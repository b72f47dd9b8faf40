//! Pan/zoom view transform. Never touches stored point coordinates.

use meshgrad_engine::coords::Vec2;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 8.0;

/// Maps canvas space to screen space as `(p + pan) * zoom`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct View {
    pub pan: Vec2,
    pub zoom: f32,
}

impl Default for View {
    fn default() -> Self {
        Self { pan: Vec2::zero(), zoom: 1.0 }
    }
}

impl View {
    pub fn new(pan: Vec2, zoom: f32) -> Self {
        Self { pan, zoom: clamp_zoom(zoom) }
    }

    #[inline]
    pub fn to_screen(&self, p: Vec2) -> Vec2 {
        (p + self.pan) * self.zoom
    }

    #[inline]
    pub fn to_canvas(&self, s: Vec2) -> Vec2 {
        s / self.zoom - self.pan
    }

    /// Pans by a screen-space delta.
    pub fn pan_by_screen(&mut self, delta: Vec2) {
        self.pan += delta / self.zoom;
    }

    /// Multiplies zoom by `factor`, keeping the canvas point under
    /// `screen_pos` where it is.
    pub fn zoom_at(&mut self, screen_pos: Vec2, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.to_canvas(screen_pos);
        self.zoom = clamp_zoom(self.zoom * factor);
        self.pan = screen_pos / self.zoom - anchor;
    }
}

fn clamp_zoom(z: f32) -> f32 {
    if z.is_finite() { z.clamp(MIN_ZOOM, MAX_ZOOM) } else { 1.0 }
}
