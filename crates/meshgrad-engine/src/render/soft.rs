use crate::render::Pixmap;
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::shapes::common::PixelSpan;
use super::shapes::text::TextRasterizer;
use super::shapes::{fill, image, line, ring, stroke};

/// CPU renderer that rasterizes a [`DrawList`] onto a [`Pixmap`].
///
/// Commands are logical-pixel geometry; `scale` maps them to surface pixels
/// (`physical = logical × scale`). Items are drawn strictly in paint order.
#[derive(Default)]
pub struct SoftRenderer {
    text: TextRasterizer,
}

impl SoftRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, draw_list: &mut DrawList, fonts: &FontSystem, target: &mut Pixmap, scale: f32) {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        let span = PixelSpan::full(target.width(), target.height());
        if span.is_empty() {
            return;
        }

        for item in draw_list.iter_in_paint_order() {
            match &item.cmd {
                DrawCmd::Fill(cmd) => fill::rasterize(target, cmd, span, scale),
                DrawCmd::Ring(cmd) => ring::rasterize(target, cmd, span, scale),
                DrawCmd::Image(cmd) => image::rasterize(target, cmd, span, scale),
                DrawCmd::Stroke(cmd) => stroke::rasterize(target, cmd, span, scale),
                DrawCmd::Line(cmd) => line::rasterize(target, cmd, span, scale),
                DrawCmd::Text(cmd) => self.text.rasterize(target, fonts, cmd, span, scale),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Outline, Rect, Vec2};
    use crate::paint::Color;
    use crate::scene::ZIndex;

    fn red() -> Color {
        Color::from_premul(1.0, 0.0, 0.0, 1.0)
    }

    #[test]
    fn higher_layers_paint_over_lower_ones() {
        let mut list = DrawList::new();
        let square = Outline::rect(Rect::new(0.0, 0.0, 4.0, 4.0));
        list.push_solid_fill(ZIndex(1), square, red());
        list.push_solid_fill(ZIndex(0), square, Color::WHITE);

        let mut pm = Pixmap::new(4, 4);
        SoftRenderer::new().render(&mut list, &FontSystem::new(), &mut pm, 1.0);
        assert_eq!(pm.get(1, 1), Some(red()));
    }

    #[test]
    fn scale_maps_logical_to_physical() {
        let mut list = DrawList::new();
        list.push_solid_fill(ZIndex(0), Outline::circle(Vec2::new(5.0, 5.0), 2.0), Color::WHITE);

        let mut pm = Pixmap::new(20, 20);
        SoftRenderer::new().render(&mut list, &FontSystem::new(), &mut pm, 2.0);
        assert_eq!(pm.get(10, 10), Some(Color::WHITE));
        assert_eq!(pm.get(5, 5), Some(Color::TRANSPARENT));
    }
}
