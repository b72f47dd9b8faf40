use crate::paint::BlendMode;
use crate::render::Pixmap;
use crate::scene::shapes::ImageCmd;

use super::common::{coverage, pixel_center, PixelSpan};

/// Rasterizes `DrawCmd::Image`: bilinear-sampled, clipped to the command's
/// outline, source-over at the command's opacity.
pub(crate) fn rasterize(target: &mut Pixmap, cmd: &ImageCmd, span: PixelSpan, scale: f32) {
    if cmd.opacity <= 0.0 || cmd.dest.is_empty() {
        return;
    }
    let span = span
        .clipped_to(cmd.dest, scale)
        .clipped_to(cmd.clip.bounds(), scale);
    if span.is_empty() {
        return;
    }

    let origin = cmd.dest.origin;
    let size = cmd.dest.size;
    for (x, y) in span.pixels() {
        let p = pixel_center(x, y, scale);
        let cov = coverage(cmd.clip.signed_distance(p) * scale);
        if cov <= 0.0 {
            continue;
        }
        let u = (p.x - origin.x) / size.x;
        let v = (p.y - origin.y) / size.y;
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            continue;
        }
        let c = cmd.image.sample(u, v).scaled(cmd.opacity * cov);
        target.blend(x, y, c, BlendMode::SourceOver);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::coords::{Outline, Rect, Vec2};
    use crate::paint::Color;

    #[test]
    fn image_is_clipped_to_outline() {
        let img = Arc::new(Pixmap::filled(4, 4, Color::WHITE));
        let cmd = ImageCmd {
            image: img,
            dest: Rect::new(0.0, 0.0, 20.0, 20.0),
            clip: Outline::circle(Vec2::new(10.0, 10.0), 5.0),
            opacity: 1.0,
        };
        let mut pm = Pixmap::new(20, 20);
        rasterize(&mut pm, &cmd, PixelSpan::full(20, 20), 1.0);
        assert_eq!(pm.get(10, 10), Some(Color::WHITE));
        assert_eq!(pm.get(1, 1), Some(Color::TRANSPARENT));
    }

    #[test]
    fn opacity_scales_the_image() {
        let img = Arc::new(Pixmap::filled(1, 1, Color::WHITE));
        let cmd = ImageCmd {
            image: img,
            dest: Rect::new(0.0, 0.0, 4.0, 4.0),
            clip: Outline::rect(Rect::new(0.0, 0.0, 4.0, 4.0)),
            opacity: 0.5,
        };
        let mut pm = Pixmap::new(4, 4);
        rasterize(&mut pm, &cmd, PixelSpan::full(4, 4), 1.0);
        assert!((pm.get(2, 2).unwrap().a - 0.5).abs() < 1e-6);
    }
}
