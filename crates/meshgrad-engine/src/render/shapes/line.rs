use crate::coords::Rect;
use crate::paint::BlendMode;
use crate::render::Pixmap;
use crate::scene::shapes::LineCmd;

use super::common::{pixel_center, PixelSpan};

/// Rasterizes `DrawCmd::Line` with butt caps.
pub(crate) fn rasterize(target: &mut Pixmap, cmd: &LineCmd, span: PixelSpan, scale: f32) {
    let axis = cmd.to - cmd.from;
    let len = axis.length();
    if cmd.width <= 0.0 || len <= f32::EPSILON || cmd.color.a <= 0.0 {
        return;
    }
    let dir = axis / len;
    let half = cmd.width * 0.5;

    let grow = half + 1.0;
    let min_x = cmd.from.x.min(cmd.to.x) - grow;
    let min_y = cmd.from.y.min(cmd.to.y) - grow;
    let max_x = cmd.from.x.max(cmd.to.x) + grow;
    let max_y = cmd.from.y.max(cmd.to.y) + grow;
    let span = span.clipped_to(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y), scale);

    for (x, y) in span.pixels() {
        let p = pixel_center(x, y, scale);
        let rel = p - cmd.from;
        let along = rel.dot(dir);
        let across = rel.dot(dir.perp()).abs();

        let side = ((half - across) * scale + 0.5).clamp(0.0, 1.0);
        let caps = (along * scale + 0.5).clamp(0.0, 1.0) * ((len - along) * scale + 0.5).clamp(0.0, 1.0);
        let cov = side * caps;
        if cov <= 0.0 {
            continue;
        }
        if let Some(dash) = cmd.dash
            && !dash.is_on(along)
        {
            continue;
        }
        target.blend(x, y, cmd.color.scaled(cov), BlendMode::SourceOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::shapes::Dash;

    #[test]
    fn horizontal_line_covers_its_row() {
        let cmd = LineCmd {
            from: Vec2::new(2.0, 5.5),
            to: Vec2::new(18.0, 5.5),
            width: 1.0,
            color: Color::WHITE,
            dash: None,
        };
        let mut pm = Pixmap::new(20, 10);
        rasterize(&mut pm, &cmd, PixelSpan::full(20, 10), 1.0);
        assert_eq!(pm.get(10, 5), Some(Color::WHITE));
        assert_eq!(pm.get(10, 7), Some(Color::TRANSPARENT));
        assert_eq!(pm.get(0, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn dashed_line_alternates() {
        let cmd = LineCmd {
            from: Vec2::new(0.0, 0.5),
            to: Vec2::new(20.0, 0.5),
            width: 1.0,
            color: Color::WHITE,
            dash: Some(Dash::new(5.0, 5.0)),
        };
        let mut pm = Pixmap::new(20, 1);
        rasterize(&mut pm, &cmd, PixelSpan::full(20, 1), 1.0);
        assert!(pm.get(2, 0).unwrap().a > 0.9);
        assert_eq!(pm.get(7, 0), Some(Color::TRANSPARENT));
        assert!(pm.get(12, 0).unwrap().a > 0.9);
    }
}
