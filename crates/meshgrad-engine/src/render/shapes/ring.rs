use crate::paint::BlendMode;
use crate::render::Pixmap;
use crate::scene::shapes::RingCmd;

use super::common::{coverage, pixel_center, PixelSpan, Shader};

/// Rasterizes `DrawCmd::Ring`.
///
/// Blurred rings are drawn on a padded scratch surface, blurred there and
/// composited source-over, so the blur only ever touches ring pixels. The
/// scratch surface covers the visible part of the ring only.
pub(crate) fn rasterize(target: &mut Pixmap, cmd: &RingCmd, span: PixelSpan, scale: f32) {
    if cmd.thickness <= 0.0 || cmd.paint.is_invisible() {
        return;
    }
    let sigma = cmd.blur.max(0.0) * scale;
    let bounds = cmd.outline.bounds();

    if sigma <= 0.0 {
        let span = span.clipped_to(bounds, scale);
        draw_band(target, cmd, span, scale, (0, 0));
        return;
    }

    let Some(window) = ScratchWindow::new(cmd, span, scale, sigma) else {
        return;
    };
    let mut scratch = Pixmap::new(window.width, window.height);
    let local = PixelSpan::full(scratch.width(), scratch.height());
    draw_band(&mut scratch, cmd, local, scale, (window.x0, window.y0));
    scratch.blur(sigma);

    for (sx, sy) in local.pixels() {
        let (tx, ty) = (window.x0 + sx as i32, window.y0 + sy as i32);
        let inside = tx >= span.x0 as i32 && tx < span.x1 as i32 && ty >= span.y0 as i32 && ty < span.y1 as i32;
        if inside && let Some(c) = scratch.get(sx, sy) {
            target.blend(tx as u32, ty as u32, c, BlendMode::SourceOver);
        }
    }
}

/// Target-pixel rectangle backing the blur scratch surface.
///
/// The ring's padded bounds intersected with `span` grown by the blur
/// padding, so its size is capped by the span however large the ring is.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct ScratchWindow {
    x0: i32,
    y0: i32,
    width: u32,
    height: u32,
}

impl ScratchWindow {
    fn new(cmd: &RingCmd, span: PixelSpan, scale: f32, sigma: f32) -> Option<Self> {
        let pad = (sigma * 3.0).ceil() as i64;
        let bounds = cmd.outline.bounds().normalized();
        let px = |v: f32| v as i64;

        let x0 = px((bounds.origin.x * scale).floor()) - pad;
        let y0 = px((bounds.origin.y * scale).floor()) - pad;
        let x1 = px(((bounds.origin.x + bounds.size.x) * scale).ceil()) + pad + 1;
        let y1 = px(((bounds.origin.y + bounds.size.y) * scale).ceil()) + pad + 1;

        let x0 = x0.max(span.x0 as i64 - pad);
        let y0 = y0.max(span.y0 as i64 - pad);
        let x1 = x1.min(span.x1 as i64 + pad);
        let y1 = y1.min(span.y1 as i64 + pad);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Self {
            x0: x0 as i32,
            y0: y0 as i32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// Draws the band into `surface`, whose pixel (0, 0) sits at target pixel `origin`.
fn draw_band(surface: &mut Pixmap, cmd: &RingCmd, span: PixelSpan, scale: f32, origin: (i32, i32)) {
    let inner = cmd.outline.inset(cmd.thickness);
    let shader = Shader::resolve(&cmd.paint);

    for (x, y) in span.pixels() {
        let gx = x as i32 + origin.0;
        let gy = y as i32 + origin.1;
        if gx < 0 || gy < 0 {
            continue;
        }
        let p = pixel_center(gx as u32, gy as u32, scale);
        let outer_cov = coverage(cmd.outline.signed_distance(p) * scale);
        let inner_cov = coverage(inner.signed_distance(p) * scale);
        let cov = (outer_cov - inner_cov).max(0.0);
        if cov <= 0.0 {
            continue;
        }
        let Some(color) = shader.shade(p) else { continue };
        surface.blend(x, y, color.scaled(cov), BlendMode::SourceOver);
    }
}
