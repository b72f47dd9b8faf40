use crate::coords::Viewport;
use crate::paint::Color;

/// Device handles plus the geometry of the frame being drawn.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Logical pixels.
    pub viewport: Viewport,
    /// Physical pixels per logical pixel.
    pub scale_factor: f32,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        scale_factor: f32,
    ) -> Self {
        Self { device, queue, surface_format, viewport, scale_factor }
    }

    /// Frame size in physical pixels, at least 1×1.
    pub fn physical_size(&self) -> (u32, u32) {
        self.viewport.physical_size(self.scale_factor)
    }
}

/// Converts an sRGB-encoded color into the clear value for `format`.
///
/// wgpu clear values are linear; on an sRGB surface the hardware encodes them
/// on store, so the channels are decoded first.
pub fn clear_value(color: Color, format: wgpu::TextureFormat) -> wgpu::Color {
    let (r, g, b, a) = color.clamped().to_straight();
    let channel = |v: f32| {
        let v = v as f64;
        if !format.is_srgb() {
            v
        } else if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    wgpu::Color { r: channel(r), g: channel(g), b: channel(b), a: a as f64 }
}

/// Encoder + color view of the frame being drawn.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_rounds_and_never_hits_zero() {
        assert_eq!(Viewport::new(100.5, 0.0).physical_size(2.0), (201, 1));
    }

    #[test]
    fn srgb_surfaces_get_linear_clear_values() {
        let grey = Color::from_srgb_u8(128, 128, 128, 255);
        let unorm = clear_value(grey, wgpu::TextureFormat::Bgra8Unorm);
        let srgb = clear_value(grey, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert!((unorm.r - 128.0 / 255.0).abs() < 1e-6);
        assert!((srgb.r - 0.2158).abs() < 1e-3);
        assert_eq!(srgb.a, 1.0);
    }
}
