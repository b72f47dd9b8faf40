use std::collections::HashMap;

use fontdue::layout::GlyphRasterConfig;
use fontdue::Metrics;

use crate::paint::BlendMode;
use crate::render::Pixmap;
use crate::scene::shapes::{TextCmd, TextRotation};
use crate::text::FontSystem;

use super::common::PixelSpan;

/// Coverage mask of one laid-out line, 1 byte per pixel.
struct LineMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl LineMask {
    #[inline]
    fn at(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }
}

/// Maps a destination pixel of the rotated block back into the mask.
#[inline]
fn mask_coord(rotation: TextRotation, dx: u32, dy: u32, w: u32, h: u32) -> (u32, u32) {
    match rotation {
        TextRotation::None => (dx, dy),
        TextRotation::Clockwise => (dy, h - 1 - dx),
        TextRotation::CounterClockwise => (w - 1 - dy, dx),
    }
}

/// Rasterizer for `DrawCmd::Text`.
///
/// Glyph bitmaps are produced by fontdue on first use and cached for the
/// rasterizer's lifetime. The cache key is `GlyphRasterConfig` (font, glyph
/// index, pixel size), so repeated labels never re-rasterize.
#[derive(Default)]
pub struct TextRasterizer {
    glyph_cache: HashMap<GlyphRasterConfig, (Metrics, Vec<u8>)>,
}

impl TextRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn rasterize(
        &mut self,
        target: &mut Pixmap,
        fonts: &FontSystem,
        cmd: &TextCmd,
        span: PixelSpan,
        scale: f32,
    ) {
        if cmd.text.is_empty() || cmd.size <= 0.0 || cmd.color.a <= 0.0 {
            return;
        }
        let Some(mask) = self.line_mask(fonts, cmd, scale) else {
            return;
        };

        let (dw, dh) = match cmd.rotation {
            TextRotation::None => (mask.width, mask.height),
            TextRotation::Clockwise | TextRotation::CounterClockwise => (mask.height, mask.width),
        };
        let left = (cmd.center.x * scale - dw as f32 * 0.5).round() as i32;
        let top = (cmd.center.y * scale - dh as f32 * 0.5).round() as i32;

        for dy in 0..dh {
            let ty = top + dy as i32;
            if ty < span.y0 as i32 || ty >= span.y1 as i32 {
                continue;
            }
            for dx in 0..dw {
                let tx = left + dx as i32;
                if tx < span.x0 as i32 || tx >= span.x1 as i32 {
                    continue;
                }
                let (mx, my) = mask_coord(cmd.rotation, dx, dy, mask.width, mask.height);
                let a = mask.at(mx, my);
                if a == 0 {
                    continue;
                }
                let src = cmd.color.scaled(a as f32 / 255.0);
                target.blend(tx as u32, ty as u32, src, BlendMode::SourceOver);
            }
        }
    }

    /// Lays out and rasterizes the whole line at physical size.
    fn line_mask(&mut self, fonts: &FontSystem, cmd: &TextCmd, scale: f32) -> Option<LineMask> {
        let font = fonts.get(cmd.font)?;
        let size = cmd.size * scale;
        let glyphs = fonts.layout_line(&cmd.text, cmd.font, size)?;

        let line_height = font
            .horizontal_line_metrics(size)
            .map_or(size * 1.2, |m| m.new_line_size);
        let width = glyphs
            .iter()
            .map(|g| (g.x + g.width as f32).ceil() as i64)
            .max()
            .unwrap_or(0)
            .max(1) as u32;
        let height = glyphs
            .iter()
            .map(|g| (g.y + g.height as f32).ceil() as i64)
            .fold(line_height.ceil() as i64, i64::max)
            .max(1) as u32;

        let mut data = vec![0u8; width as usize * height as usize];
        for g in &glyphs {
            if g.width == 0 || g.height == 0 {
                continue;
            }
            let (metrics, bitmap) = self
                .glyph_cache
                .entry(g.key)
                .or_insert_with(|| font.rasterize_config(g.key));
            let gx = g.x.round() as i64;
            let gy = g.y.round() as i64;
            for row in 0..metrics.height {
                let y = gy + row as i64;
                if y < 0 || y >= height as i64 {
                    continue;
                }
                for col in 0..metrics.width {
                    let x = gx + col as i64;
                    if x < 0 || x >= width as i64 {
                        continue;
                    }
                    let i = y as usize * width as usize + x as usize;
                    data[i] = data[i].max(bitmap[row * metrics.width + col]);
                }
            }
        }

        Some(LineMask { width, height, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::text::FontId;

    #[test]
    fn unknown_font_draws_nothing() {
        let fonts = FontSystem::new();
        let mut raster = TextRasterizer::new();
        let mut pm = Pixmap::new(20, 20);
        let cmd = TextCmd {
            text: "Top".into(),
            font: FontId(0),
            size: 12.0,
            color: Color::WHITE,
            center: Vec2::new(10.0, 10.0),
            rotation: TextRotation::Clockwise,
        };
        raster.rasterize(&mut pm, &fonts, &cmd, PixelSpan::full(20, 20), 1.0);
        assert!(pm.pixels().iter().all(|c| c.a == 0.0));
    }

    #[test]
    fn clockwise_puts_the_first_glyph_on_top() {
        // 3×2 mask, rotated block is 2×3.
        assert_eq!(mask_coord(TextRotation::Clockwise, 0, 0, 3, 2), (0, 1));
        assert_eq!(mask_coord(TextRotation::Clockwise, 1, 2, 3, 2), (2, 0));
    }

    #[test]
    fn counter_clockwise_puts_the_last_glyph_on_top() {
        assert_eq!(mask_coord(TextRotation::CounterClockwise, 0, 0, 3, 2), (2, 0));
        assert_eq!(mask_coord(TextRotation::CounterClockwise, 1, 2, 3, 2), (0, 1));
    }

    #[test]
    fn unrotated_is_identity() {
        let mask = LineMask { width: 3, height: 2, data: vec![1, 2, 3, 4, 5, 6] };
        let (mx, my) = mask_coord(TextRotation::None, 2, 1, 3, 2);
        assert_eq!(mask.at(mx, my), 6);
    }
}
