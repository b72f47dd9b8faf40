use crate::coords::Rect;
use crate::paint::BlendMode;
use crate::render::Pixmap;
use crate::scene::shapes::StrokeCmd;

use super::common::{pixel_center, PixelSpan};

/// Rasterizes `DrawCmd::Stroke`, centered on the outline boundary.
///
/// Dashes are laid out by arc length along the outline.
pub(crate) fn rasterize(target: &mut Pixmap, cmd: &StrokeCmd, span: PixelSpan, scale: f32) {
    if cmd.width <= 0.0 || cmd.color.a <= 0.0 {
        return;
    }
    let half = cmd.width * 0.5;
    let b = cmd.outline.bounds();
    let grow = half + 1.0;
    let bounds = Rect::new(b.origin.x - grow, b.origin.y - grow, b.size.x + grow * 2.0, b.size.y + grow * 2.0);
    let span = span.clipped_to(bounds, scale);

    let half_px = half * scale;
    for (x, y) in span.pixels() {
        let p = pixel_center(x, y, scale);
        let d = cmd.outline.boundary_distance(p) * scale;
        let cov = (half_px + 0.5 - d).clamp(0.0, 1.0);
        if cov <= 0.0 {
            continue;
        }
        if let Some(dash) = cmd.dash
            && !dash.is_on(cmd.outline.arc_position(p))
        {
            continue;
        }
        target.blend(x, y, cmd.color.scaled(cov), BlendMode::SourceOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Outline, Vec2};
    use crate::paint::Color;
    use crate::scene::shapes::Dash;

    fn stroke(dash: Option<Dash>) -> Pixmap {
        let cmd = StrokeCmd {
            outline: Outline::circle(Vec2::new(30.0, 30.0), 20.0),
            width: 2.0,
            color: Color::WHITE,
            dash,
        };
        let mut pm = Pixmap::new(60, 60);
        rasterize(&mut pm, &cmd, PixelSpan::full(60, 60), 1.0);
        pm
    }

    #[test]
    fn stroke_hugs_the_boundary() {
        let pm = stroke(None);
        assert!(pm.get(49, 29).unwrap().a > 0.9);
        assert_eq!(pm.get(30, 30), Some(Color::TRANSPARENT));
    }

    #[test]
    fn dashes_leave_gaps() {
        let solid = stroke(None);
        let dashed = stroke(Some(Dash::new(4.0, 4.0)));
        let count = |pm: &Pixmap| pm.pixels().iter().filter(|c| c.a > 0.5).count();
        assert!(count(&dashed) < count(&solid));
        assert!(count(&dashed) > 0);
    }
}
