use crate::render::Pixmap;
use crate::scene::shapes::FillCmd;

use super::common::{coverage, pixel_center, PixelSpan, Shader};

/// Rasterizes `DrawCmd::Fill`.
///
/// Per pixel: shape coverage × optional falloff weight × paint, composited
/// with the command's blend mode. Pixels where the paint is undefined (a
/// radial gradient with no solution) are left untouched.
pub(crate) fn rasterize(target: &mut Pixmap, cmd: &FillCmd, span: PixelSpan, scale: f32) {
    let span = span.clipped_to(cmd.outline.bounds(), scale);
    if span.is_empty() || cmd.paint.is_invisible() {
        return;
    }
    let shader = Shader::resolve(&cmd.paint);

    for (x, y) in span.pixels() {
        let p = pixel_center(x, y, scale);
        let cov = coverage(cmd.outline.signed_distance(p) * scale);
        if cov <= 0.0 {
            continue;
        }
        let weight = cmd.falloff.map_or(1.0, |f| f.weight_at(p));
        if weight <= 0.0 {
            continue;
        }
        let Some(color) = shader.shade(p) else { continue };
        target.blend(x, y, color.scaled(cov * weight), cmd.blend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Outline, Rect, Vec2};
    use crate::paint::{BlendMode, Color, EdgeProfile, Falloff, Paint};

    fn run(cmd: FillCmd, target: &mut Pixmap) {
        let span = PixelSpan::full(target.width(), target.height());
        rasterize(target, &cmd, span, 1.0);
    }

    #[test]
    fn rect_fill_covers_interior_only() {
        let mut pm = Pixmap::new(10, 10);
        run(FillCmd::new(Outline::rect(Rect::new(2.0, 2.0, 4.0, 4.0)), Paint::Solid(Color::WHITE)), &mut pm);
        assert_eq!(pm.get(3, 3), Some(Color::WHITE));
        assert_eq!(pm.get(7, 7), Some(Color::TRANSPARENT));
    }

    #[test]
    fn falloff_fades_toward_the_edge() {
        let mut pm = Pixmap::new(41, 41);
        let center = Vec2::new(20.5, 20.5);
        let cmd = FillCmd::new(Outline::circle(center, 20.0), Paint::Solid(Color::WHITE))
            .with_falloff(Falloff::new(center, 20.0, EdgeProfile::Soft));
        run(cmd, &mut pm);
        let inner = pm.get(20, 20).unwrap().a;
        let outer = pm.get(35, 20).unwrap().a;
        assert!(inner > 0.95);
        assert!(outer > 0.0 && outer < inner);
    }

    #[test]
    fn screen_blend_brightens_existing_pixels() {
        let mut pm = Pixmap::filled(4, 4, Color::from_premul(0.2, 0.2, 0.2, 1.0));
        let cmd = FillCmd::new(Outline::rect(Rect::new(0.0, 0.0, 4.0, 4.0)), Paint::Solid(Color::from_premul(0.5, 0.0, 0.0, 0.5)))
            .with_blend(BlendMode::Screen);
        run(cmd, &mut pm);
        let px = pm.get(1, 1).unwrap();
        assert!(px.r > 0.2);
        assert!((px.g - 0.2).abs() < 1e-6);
    }
}
