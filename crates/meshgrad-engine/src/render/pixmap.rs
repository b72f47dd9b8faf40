use crate::paint::{BlendMode, Color};

/// CPU raster surface of premultiplied colors, row-major, top-left origin.
///
/// Layer surfaces, decoded images and blur scratch buffers are all pixmaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<Color>,
}

impl Pixmap {
    /// Transparent surface. Zero dimensions are bumped to 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self { width, height, data: vec![color; width as usize * height as usize] }
    }

    /// Builds a pixmap from straight-alpha RGBA bytes.
    ///
    /// Returns `None` if `bytes` does not hold exactly `width × height` pixels.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if width == 0 || height == 0 || bytes.len() != width as usize * height as usize * 4 {
            return None;
        }
        let data = bytes
            .chunks_exact(4)
            .map(|px| Color::from_srgb_u8(px[0], px[1], px[2], px[3]))
            .collect();
        Some(Self { width, height, data })
    }

    /// Straight-alpha RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data.iter().flat_map(|c| c.to_srgb_u8()).collect()
    }

    /// Premultiplied RGBA bytes, the layout GPU upload expects.
    pub fn to_premul_rgba8(&self) -> Vec<u8> {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.data
            .iter()
            .flat_map(|c| {
                let c = c.clamped();
                [q(c.r), q(c.g), q(c.b), q(c.a)]
            })
            .collect()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.data[self.index(x, y)])
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.data[i] = color;
        }
    }

    /// Composites `src` onto the pixel at `(x, y)`.
    #[inline]
    pub fn blend(&mut self, x: u32, y: u32, src: Color, mode: BlendMode) {
        if x < self.width && y < self.height && src.a > 0.0 {
            let i = self.index(x, y);
            self.data[i] = mode.apply(src, self.data[i]);
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.data.fill(color);
    }

    /// Composites `src` with its top-left at `(dx, dy)`. Pixels falling
    /// outside this surface are dropped.
    pub fn draw_pixmap(&mut self, src: &Pixmap, dx: i32, dy: i32, mode: BlendMode) {
        for sy in 0..src.height {
            let ty = dy + sy as i32;
            if ty < 0 || ty >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width {
                let tx = dx + sx as i32;
                if tx < 0 || tx >= self.width as i32 {
                    continue;
                }
                self.blend(tx as u32, ty as u32, src.data[src.index(sx, sy)], mode);
            }
        }
    }

    /// Bilinear sample at normalized coordinates (`0..1` across the image),
    /// clamped at the edges.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let fx = (u * self.width as f32 - 0.5).clamp(0.0, (self.width - 1) as f32);
        let fy = (v * self.height as f32 - 0.5).clamp(0.0, (self.height - 1) as f32);
        let (x0, y0) = (fx.floor() as u32, fy.floor() as u32);
        let (x1, y1) = ((x0 + 1).min(self.width - 1), (y0 + 1).min(self.height - 1));
        let (tx, ty) = (fx - x0 as f32, fy - y0 as f32);

        let top = self.data[self.index(x0, y0)].lerp(self.data[self.index(x1, y0)], tx);
        let bottom = self.data[self.index(x0, y1)].lerp(self.data[self.index(x1, y1)], tx);
        top.lerp(bottom, ty)
    }

    /// Separable gaussian blur with standard deviation `sigma` (pixels).
    ///
    /// Edges are clamped. `sigma <= 0` is a no-op.
    pub fn blur(&mut self, sigma: f32) {
        if sigma <= 0.0 || !sigma.is_finite() {
            return;
        }
        let kernel = gaussian_kernel(sigma);
        let r = (kernel.len() / 2) as i32;
        let (w, h) = (self.width as i32, self.height as i32);
        let mut tmp = vec![Color::TRANSPARENT; self.data.len()];

        for y in 0..h {
            for x in 0..w {
                let mut acc = [0.0f32; 4];
                for (k, weight) in kernel.iter().enumerate() {
                    let sx = (x + k as i32 - r).clamp(0, w - 1);
                    accumulate(&mut acc, self.data[(y * w + sx) as usize], *weight);
                }
                tmp[(y * w + x) as usize] = Color::from_premul(acc[0], acc[1], acc[2], acc[3]);
            }
        }
        for y in 0..h {
            for x in 0..w {
                let mut acc = [0.0f32; 4];
                for (k, weight) in kernel.iter().enumerate() {
                    let sy = (y + k as i32 - r).clamp(0, h - 1);
                    accumulate(&mut acc, tmp[(sy * w + x) as usize], *weight);
                }
                self.data[(y * w + x) as usize] = Color::from_premul(acc[0], acc[1], acc[2], acc[3]);
            }
        }
    }
}

#[inline]
fn accumulate(acc: &mut [f32; 4], c: Color, w: f32) {
    acc[0] += c.r * w;
    acc[1] += c.g * w;
    acc[2] += c.b * w;
    acc[3] += c.a * w;
}

/// Normalized kernel covering ±3σ.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let r = (sigma * 3.0).ceil().max(1.0) as i32;
    let denom = 2.0 * sigma * sigma;
    let mut k: Vec<f32> = (-r..=r).map(|i| (-((i * i) as f32) / denom).exp()).collect();
    let sum: f32 = k.iter().sum();
    for v in &mut k {
        *v /= sum;
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── bytes ─────────────────────────────────────────────────────────────

    #[test]
    fn rgba8_round_trip() {
        let bytes = [255, 0, 0, 255, 0, 128, 255, 128];
        let pm = Pixmap::from_rgba8(2, 1, &bytes).unwrap();
        assert_eq!(pm.to_rgba8(), bytes.to_vec());
    }

    #[test]
    fn rgba8_rejects_wrong_length() {
        assert!(Pixmap::from_rgba8(2, 2, &[0; 12]).is_none());
        assert!(Pixmap::from_rgba8(0, 2, &[]).is_none());
    }

    // ── compositing ───────────────────────────────────────────────────────

    #[test]
    fn draw_pixmap_clips_to_target() {
        let mut dst = Pixmap::new(4, 4);
        let src = Pixmap::filled(2, 2, Color::WHITE);
        dst.draw_pixmap(&src, 3, -1, BlendMode::SourceOver);
        assert_eq!(dst.get(3, 0), Some(Color::WHITE));
        assert_eq!(dst.get(2, 0), Some(Color::TRANSPARENT));
        assert_eq!(dst.get(3, 1), Some(Color::TRANSPARENT));
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut pm = Pixmap::new(2, 2);
        pm.set(5, 5, Color::WHITE);
        pm.blend(2, 0, Color::WHITE, BlendMode::Screen);
        assert_eq!(pm.get(5, 5), None);
        assert!(pm.pixels().iter().all(|c| *c == Color::TRANSPARENT));
    }

    // ── blur ──────────────────────────────────────────────────────────────

    #[test]
    fn blur_preserves_flat_fields() {
        let c = Color::from_premul(0.25, 0.5, 0.75, 1.0);
        let mut pm = Pixmap::filled(9, 9, c);
        pm.blur(2.0);
        for px in pm.pixels() {
            assert!((px.g - 0.5).abs() < 1e-4);
        }
    }

    #[test]
    fn blur_spreads_a_point() {
        let mut pm = Pixmap::new(11, 11);
        pm.set(5, 5, Color::WHITE);
        pm.blur(1.5);
        let center = pm.get(5, 5).unwrap().a;
        let near = pm.get(6, 5).unwrap().a;
        assert!(center < 1.0);
        assert!(near > 0.0 && near < center);
        let total: f32 = pm.pixels().iter().map(|c| c.a).sum();
        assert!((total - 1.0).abs() < 1e-3);
    }

    // ── sampling ──────────────────────────────────────────────────────────

    #[test]
    fn sample_hits_pixel_centers() {
        let pm = Pixmap::from_rgba8(2, 1, &[0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
        assert_eq!(pm.sample(0.25, 0.5), Color::BLACK);
        assert_eq!(pm.sample(0.75, 0.5), Color::WHITE);
        assert!((pm.sample(0.5, 0.5).r - 0.5).abs() < 1e-5);
    }
}
